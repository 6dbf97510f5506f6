//! Typed step catalog: which controls each wizard step owns
//!
//! Every selection tile is addressed by a [`TileId`] and resolved to a
//! `(ChoiceField, value)` pair through the catalog. The catalog is validated
//! once at construction so the controller never deals with unknown fields.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Number of steps the wizard is built around
pub const STEP_COUNT: usize = 8;

/// Index of the final (treatments) step
pub const FINAL_STEP: usize = STEP_COUNT - 1;

/// Single-choice text fields filled by selection tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceField {
    Crop,
    PreviousCrop,
    SoilType,
    SoilTexture,
    GrowthStage,
    IrrigationType,
    IrrigationStatus,
    LeafColor,
    Spots,
    Pests,
    QuickHumidity,
    FertilizerType,
    PesticideType,
}

impl ChoiceField {
    /// Step that must own this field
    pub fn expected_step(&self) -> usize {
        match self {
            ChoiceField::Crop => 0,
            ChoiceField::PreviousCrop => 1,
            ChoiceField::SoilType | ChoiceField::SoilTexture => 2,
            ChoiceField::GrowthStage => 3,
            ChoiceField::IrrigationType | ChoiceField::IrrigationStatus => 4,
            ChoiceField::LeafColor | ChoiceField::Spots | ChoiceField::Pests => 5,
            ChoiceField::QuickHumidity => 6,
            ChoiceField::FertilizerType | ChoiceField::PesticideType => 7,
        }
    }

    /// Detail panel that hides this field, if any
    pub fn panel(&self) -> Option<Panel> {
        match self {
            ChoiceField::FertilizerType => Some(Panel::FertilizerDetails),
            ChoiceField::PesticideType => Some(Panel::PesticideDetails),
            _ => None,
        }
    }
}

/// Yes/No radio groups of the treatments step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Treatment {
    Fertilizer,
    Pesticide,
    Fungicide,
}

impl Treatment {
    pub const ALL: [Treatment; 3] = [Treatment::Fertilizer, Treatment::Pesticide, Treatment::Fungicide];

    /// Detail panel revealed when the answer is Yes
    pub fn panel(&self) -> Panel {
        match self {
            Treatment::Fertilizer => Panel::FertilizerDetails,
            Treatment::Pesticide => Panel::PesticideDetails,
            Treatment::Fungicide => Panel::FungicideDetails,
        }
    }
}

/// Range sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    LeafYellow,
    Rainfall,
    FertilizerQty,
    PesticideQty,
}

impl Slider {
    pub fn expected_step(&self) -> usize {
        match self {
            Slider::LeafYellow => 5,
            Slider::Rainfall => 6,
            Slider::FertilizerQty | Slider::PesticideQty => 7,
        }
    }

    /// (min, max, keyboard step)
    pub fn range(&self) -> (f64, f64, f64) {
        match self {
            Slider::LeafYellow => (0.0, 100.0, 5.0),
            Slider::Rainfall => (0.0, 150.0, 5.0),
            Slider::FertilizerQty | Slider::PesticideQty => (0.0, 200.0, 5.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Slider::LeafYellow => "%",
            Slider::Rainfall => "mm",
            Slider::FertilizerQty => "kg/acre",
            Slider::PesticideQty => "ml/acre",
        }
    }

    pub fn panel(&self) -> Option<Panel> {
        match self {
            Slider::FertilizerQty => Some(Panel::FertilizerDetails),
            Slider::PesticideQty => Some(Panel::PesticideDetails),
            _ => None,
        }
    }
}

/// Free numeric inputs that clamp on every keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundedField {
    IrrigationCount,
    FungicideSprays,
}

impl BoundedField {
    pub fn expected_step(&self) -> usize {
        match self {
            BoundedField::IrrigationCount => 4,
            BoundedField::FungicideSprays => 7,
        }
    }

    pub fn panel(&self) -> Option<Panel> {
        match self {
            BoundedField::IrrigationCount => None,
            BoundedField::FungicideSprays => Some(Panel::FungicideDetails),
        }
    }
}

/// Dependent detail panels of the treatments step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    FertilizerDetails,
    PesticideDetails,
    FungicideDetails,
}

/// One control on a step
#[derive(Debug, Clone)]
pub enum Control {
    Tiles {
        field: ChoiceField,
        label: String,
        options: Vec<String>,
    },
    Radio {
        treatment: Treatment,
        label: String,
    },
    Slider {
        slider: Slider,
        label: String,
    },
    Bounded {
        field: BoundedField,
        label: String,
    },
}

impl Control {
    pub fn label(&self) -> &str {
        match self {
            Control::Tiles { label, .. }
            | Control::Radio { label, .. }
            | Control::Slider { label, .. }
            | Control::Bounded { label, .. } => label,
        }
    }

    pub fn expected_step(&self) -> usize {
        match self {
            Control::Tiles { field, .. } => field.expected_step(),
            Control::Radio { .. } => FINAL_STEP,
            Control::Slider { slider, .. } => slider.expected_step(),
            Control::Bounded { field, .. } => field.expected_step(),
        }
    }

    /// Panel gating this control's visibility
    pub fn panel(&self) -> Option<Panel> {
        match self {
            Control::Tiles { field, .. } => field.panel(),
            Control::Radio { .. } => None,
            Control::Slider { slider, .. } => slider.panel(),
            Control::Bounded { field, .. } => field.panel(),
        }
    }

    fn key(&self) -> String {
        match self {
            Control::Tiles { field, .. } => format!("{:?}", field),
            Control::Radio { treatment, .. } => format!("{:?}", treatment),
            Control::Slider { slider, .. } => format!("{:?}", slider),
            Control::Bounded { field, .. } => format!("{:?}", field),
        }
    }
}

/// A wizard step: its title, prompt and controls in display order
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub title: String,
    pub prompt: String,
    pub controls: Vec<Control>,
}

impl StepDefinition {
    pub fn new(title: &str, prompt: &str, controls: Vec<Control>) -> Self {
        Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
            controls,
        }
    }
}

/// Identity of a selection tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub field: ChoiceField,
    pub index: usize,
}

impl TileId {
    pub fn new(field: ChoiceField, index: usize) -> Self {
        Self { field, index }
    }
}

/// Catalog construction failures
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("expected {expected} steps, found {found}")]
    StepCount { expected: usize, found: usize },

    #[error("step {step} has an empty title")]
    EmptyTitle { step: usize },

    #[error("control {control} belongs on step {expected}, found on step {found}")]
    MisplacedControl {
        control: String,
        expected: usize,
        found: usize,
    },

    #[error("control {control} appears more than once")]
    DuplicateControl { control: String },

    #[error("tile group {field:?} has no options")]
    EmptyGroup { field: ChoiceField },

    #[error("tile group {field:?} has an empty option")]
    EmptyOption { field: ChoiceField },

    #[error("tile group {field:?} repeats option '{value}'")]
    DuplicateOption { field: ChoiceField, value: String },
}

/// Validated step catalog
#[derive(Debug, Clone)]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
    groups: HashMap<ChoiceField, Vec<String>>,
}

impl StepCatalog {
    /// Validate step definitions and build the tile lookup
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, CatalogError> {
        if steps.len() != STEP_COUNT {
            return Err(CatalogError::StepCount {
                expected: STEP_COUNT,
                found: steps.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut groups = HashMap::new();

        for (index, step) in steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { step: index });
            }

            for control in &step.controls {
                let key = control.key();
                if control.expected_step() != index {
                    return Err(CatalogError::MisplacedControl {
                        control: key,
                        expected: control.expected_step(),
                        found: index,
                    });
                }
                if !seen.insert(key.clone()) {
                    return Err(CatalogError::DuplicateControl { control: key });
                }

                if let Control::Tiles { field, options, .. } = control {
                    if options.is_empty() {
                        return Err(CatalogError::EmptyGroup { field: *field });
                    }
                    let mut values = HashSet::new();
                    for option in options {
                        if option.trim().is_empty() {
                            return Err(CatalogError::EmptyOption { field: *field });
                        }
                        if !values.insert(option.as_str()) {
                            return Err(CatalogError::DuplicateOption {
                                field: *field,
                                value: option.clone(),
                            });
                        }
                    }
                    groups.insert(*field, options.clone());
                }
            }
        }

        Ok(Self { steps, groups })
    }

    /// The stock CropSense questionnaire
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_steps())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Options of a tile group
    pub fn options(&self, field: ChoiceField) -> &[String] {
        self.groups.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve a tile to the field it writes and the value it carries
    pub fn resolve(&self, tile: TileId) -> Option<(ChoiceField, &str)> {
        self.groups
            .get(&tile.field)
            .and_then(|options| options.get(tile.index))
            .map(|value| (tile.field, value.as_str()))
    }

    /// Find the tile carrying `value` in a group
    pub fn tile_for(&self, field: ChoiceField, value: &str) -> Option<TileId> {
        self.groups
            .get(&field)
            .and_then(|options| options.iter().position(|o| o == value))
            .map(|index| TileId::new(field, index))
    }
}

fn tiles(field: ChoiceField, label: &str, options: &[&str]) -> Control {
    Control::Tiles {
        field,
        label: label.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

fn standard_steps() -> Vec<StepDefinition> {
    const CROPS: [&str; 8] = [
        "Rice", "Wheat", "Maize", "Cotton", "Sugarcane", "Soybean", "Groundnut", "Pulses",
    ];

    let mut previous: Vec<&str> = CROPS.to_vec();
    previous.push("Fallow");

    vec![
        StepDefinition::new(
            "Crop",
            "Which crop is in the field?",
            vec![tiles(ChoiceField::Crop, "Crop", &CROPS)],
        ),
        StepDefinition::new(
            "Previous Crop",
            "What was grown in the previous season?",
            vec![tiles(ChoiceField::PreviousCrop, "Previous crop", &previous)],
        ),
        StepDefinition::new(
            "Soil",
            "Describe the soil",
            vec![
                tiles(
                    ChoiceField::SoilType,
                    "Soil type",
                    &["Alluvial", "Black", "Red", "Laterite", "Sandy", "Clayey"],
                ),
                tiles(
                    ChoiceField::SoilTexture,
                    "Soil texture",
                    &["Sandy", "Loamy", "Clay Loam", "Clay", "Silty"],
                ),
            ],
        ),
        StepDefinition::new(
            "Growth Stage",
            "Current growth stage of the crop",
            vec![tiles(
                ChoiceField::GrowthStage,
                "Growth stage",
                &["Germination", "Vegetative", "Flowering", "Fruiting", "Maturity"],
            )],
        ),
        StepDefinition::new(
            "Irrigation",
            "How is the field irrigated?",
            vec![
                tiles(
                    ChoiceField::IrrigationType,
                    "Irrigation type",
                    &["Flood", "Drip", "Sprinkler", "Furrow", "Rainfed"],
                ),
                tiles(
                    ChoiceField::IrrigationStatus,
                    "Soil moisture now",
                    &["Dry", "Normal", "Moist", "Waterlogged"],
                ),
                Control::Bounded {
                    field: BoundedField::IrrigationCount,
                    label: "Irrigations since sowing (0-25)".to_string(),
                },
            ],
        ),
        StepDefinition::new(
            "Leaf & Pests",
            "What do the leaves look like?",
            vec![
                tiles(
                    ChoiceField::LeafColor,
                    "Leaf colour",
                    &["Normal Green", "Light Green", "Pale Yellow", "Yellow", "Brownish"],
                ),
                tiles(ChoiceField::Spots, "Leaf spots", &["None", "Few", "Many"]),
                tiles(
                    ChoiceField::Pests,
                    "Pest damage",
                    &["NoDamage", "Low", "Moderate", "Severe"],
                ),
                Control::Slider {
                    slider: Slider::LeafYellow,
                    label: "Leaf yellowing".to_string(),
                },
            ],
        ),
        StepDefinition::new(
            "Weather",
            "Recent weather in the field",
            vec![
                tiles(ChoiceField::QuickHumidity, "Humidity", &["Low", "Medium", "High"]),
                Control::Slider {
                    slider: Slider::Rainfall,
                    label: "Rainfall, last 15 days".to_string(),
                },
            ],
        ),
        StepDefinition::new(
            "Treatments",
            "Inputs applied so far",
            vec![
                Control::Radio {
                    treatment: Treatment::Fertilizer,
                    label: "Used fertilizer?".to_string(),
                },
                tiles(
                    ChoiceField::FertilizerType,
                    "Fertilizer type",
                    &["Urea", "DAP", "MOP", "NPK 19-19-19", "SSP", "Organic Manure"],
                ),
                Control::Slider {
                    slider: Slider::FertilizerQty,
                    label: "Fertilizer quantity".to_string(),
                },
                Control::Radio {
                    treatment: Treatment::Pesticide,
                    label: "Used pesticide?".to_string(),
                },
                tiles(
                    ChoiceField::PesticideType,
                    "Pesticide type",
                    &[
                        "Neem Oil",
                        "Imidacloprid",
                        "Chlorpyrifos",
                        "Lambda-cyhalothrin",
                        "Emamectin Benzoate",
                    ],
                ),
                Control::Slider {
                    slider: Slider::PesticideQty,
                    label: "Pesticide quantity".to_string(),
                },
                Control::Radio {
                    treatment: Treatment::Fungicide,
                    label: "Used fungicide?".to_string(),
                },
                Control::Bounded {
                    field: BoundedField::FungicideSprays,
                    label: "Fungicide sprays, last 30 days".to_string(),
                },
            ],
        ),
    ]
}
