//! Interactive TUI wizard for collecting crop observations
//!
//! The shell owns a [`WizardController`] backed by a recording [`ViewState`]
//! and translates key presses into controller operations. Rendering reads the
//! view state only, so what is drawn is exactly what the controller decided.
//!
//! # Keys
//!
//! - Up/Down move between the controls of the current step
//! - Left/Right change the focused control (tile, yes/no, slider, count)
//! - Digits type into count fields, Backspace deletes a digit
//! - Enter advances, or submits on the final step once it is complete
//! - Backspace on any other control goes back one step
//! - Q/Esc asks for quit confirmation

use std::io::{stdout, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Terminal,
};
use tracing::debug;

use crate::advisor::{
    BoundedField, Control, CropInputs, DisplayedControl, NavOutcome, RecommendationRequest,
    Slider, StepCatalog, TileId, Treatment, ViewState, WizardController, YesNo, FINAL_STEP,
};

// ============================================================================
// Core Result Types
// ============================================================================

/// How the wizard ended
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    /// Final step completed; send this request
    Submit(RecommendationRequest),
    /// User quit
    Quit,
}

/// Action to take after handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    /// Stay on the current screen
    Stay,
    /// Ask for quit confirmation
    Quit,
    /// Leave the wizard with this outcome
    Complete(WizardOutcome),
}

// ============================================================================
// Wizard Shell State
// ============================================================================

/// Terminal-side state around the controller
pub struct WizardShell {
    controller: WizardController<ViewState>,
    focus: usize,
    show_quit_confirm: bool,
    blocked_hint: bool,
}

impl WizardShell {
    pub fn new(catalog: StepCatalog) -> Self {
        let mut controller = WizardController::new(catalog, ViewState::new());
        controller.open();
        Self {
            controller,
            focus: 0,
            show_quit_confirm: false,
            blocked_hint: false,
        }
    }

    pub fn controller(&self) -> &WizardController<ViewState> {
        &self.controller
    }

    pub fn into_controller(self) -> WizardController<ViewState> {
        self.controller
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Controls of the current step whose detail panel is open
    pub fn visible_controls(&self) -> Vec<Control> {
        let step = self.controller.current_step();
        let view = self.controller.view();
        self.controller
            .catalog()
            .step(step)
            .map(|def| {
                def.controls
                    .iter()
                    .filter(|c| c.panel().map_or(true, |p| view.is_panel_visible(p)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn focused_control(&self) -> Option<Control> {
        self.visible_controls().into_iter().nth(self.focus)
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.visible_controls().len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    /// Keep focus on an existing row after panels collapse
    fn clamp_focus(&mut self) {
        let count = self.visible_controls().len();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
    }

    fn adjust(&mut self, forward: bool) {
        let Some(control) = self.focused_control() else {
            return;
        };
        match control {
            Control::Tiles { field, options, .. } => {
                if options.is_empty() {
                    return;
                }
                let index = match self.controller.view().selected(field) {
                    None => 0,
                    Some(i) if forward => (i + 1).min(options.len() - 1),
                    Some(i) => i.saturating_sub(1),
                };
                self.controller.select_tile(TileId::new(field, index));
            }
            Control::Radio { treatment, .. } => {
                let answer = if forward { YesNo::No } else { YesNo::Yes };
                self.controller.set_yes_no(treatment, answer);
                self.clamp_focus();
            }
            Control::Slider { slider, .. } => {
                let (_, _, step) = slider.range();
                let current = slider_value(self.controller.inputs(), slider);
                let next = if forward { current + step } else { current - step };
                self.controller.set_slider(slider, next);
            }
            Control::Bounded { field, .. } => {
                let current = i64::from(bounded_value(self.controller.inputs(), field));
                let next = if forward { current + 1 } else { current - 1 };
                self.controller.input_bounded(field, next);
            }
        }
    }

    /// Type a digit into the focused count field
    fn type_digit(&mut self, digit: char) {
        let Some(Control::Bounded { field, .. }) = self.focused_control() else {
            return;
        };
        let mut text = self.displayed_bounded(field);
        text.push(digit);
        let raw = text.parse::<i64>().unwrap_or(i64::MAX);
        self.controller.input_bounded(field, raw);
    }

    /// Delete a digit; returns false when there was nothing to delete
    fn delete_digit(&mut self) -> bool {
        let Some(Control::Bounded { field, .. }) = self.focused_control() else {
            return false;
        };
        let mut text = self.displayed_bounded(field);
        if text.is_empty() || text == "0" {
            return false;
        }
        text.pop();
        let raw = text.parse::<i64>().unwrap_or(0);
        self.controller.input_bounded(field, raw);
        true
    }

    fn displayed_bounded(&self, field: BoundedField) -> String {
        self.controller
            .view()
            .displayed(DisplayedControl::Bounded(field))
            .map(str::to_string)
            .unwrap_or_else(|| bounded_value(self.controller.inputs(), field).to_string())
    }

    fn answer_focused_radio(&mut self, answer: YesNo) {
        if let Some(Control::Radio { treatment, .. }) = self.focused_control() {
            self.controller.set_yes_no(treatment, answer);
            self.clamp_focus();
        }
    }

    fn submit_or_advance(&mut self) -> StepAction {
        match self.controller.go_next_or_submit() {
            NavOutcome::Blocked => {
                self.blocked_hint = true;
                StepAction::Stay
            }
            NavOutcome::Moved(step) => {
                debug!(step, "Advanced");
                self.focus = 0;
                StepAction::Stay
            }
            NavOutcome::Submit(request) => StepAction::Complete(WizardOutcome::Submit(request)),
        }
    }

    /// Translate one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> StepAction {
        self.blocked_hint = false;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => StepAction::Quit,
            KeyCode::Up => {
                self.move_focus(false);
                StepAction::Stay
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_focus(true);
                StepAction::Stay
            }
            KeyCode::Left => {
                self.adjust(false);
                StepAction::Stay
            }
            KeyCode::Right => {
                self.adjust(true);
                StepAction::Stay
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.answer_focused_radio(YesNo::Yes);
                StepAction::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.answer_focused_radio(YesNo::No);
                StepAction::Stay
            }
            KeyCode::Char(' ') => {
                // Confirm a slider at its current value
                if let Some(Control::Slider { slider, .. }) = self.focused_control() {
                    let current = slider_value(self.controller.inputs(), slider);
                    self.controller.set_slider(slider, current);
                }
                StepAction::Stay
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.type_digit(c);
                StepAction::Stay
            }
            KeyCode::Backspace => {
                if !self.delete_digit() && self.controller.current_step() > 0 {
                    self.controller.go_prev();
                    self.focus = 0;
                }
                StepAction::Stay
            }
            KeyCode::Enter => self.submit_or_advance(),
            _ => StepAction::Stay,
        }
    }
}

fn slider_value(inputs: &CropInputs, slider: Slider) -> f64 {
    match slider {
        Slider::LeafYellow => f64::from(inputs.leaf_yellow_percent),
        Slider::Rainfall => inputs.rainfall_15,
        Slider::FertilizerQty => inputs.fertilizer_qty,
        Slider::PesticideQty => inputs.pesticide_qty,
    }
}

fn bounded_value(inputs: &CropInputs, field: BoundedField) -> u32 {
    match field {
        BoundedField::IrrigationCount => inputs.irrigation_count,
        BoundedField::FungicideSprays => inputs.fungicide_sprays,
    }
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Install panic hook for clean terminal restoration
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point
// ============================================================================

/// Run the wizard; returns the outcome and the controller holding the answers
pub fn run_wizard(
    catalog: StepCatalog,
) -> Result<(WizardOutcome, WizardController<ViewState>)> {
    let mut shell = WizardShell::new(catalog);

    let mut terminal = setup_terminal()?;
    let result = run_wizard_loop(&mut terminal, &mut shell);
    teardown_terminal();

    let outcome = result?;
    let mut controller = shell.into_controller();
    if outcome == WizardOutcome::Quit {
        controller.close();
    }
    Ok((outcome, controller))
}

// ============================================================================
// Event Loop
// ============================================================================

fn run_wizard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    shell: &mut WizardShell,
) -> Result<WizardOutcome> {
    loop {
        terminal.draw(|f| render_wizard(f, shell))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if shell.show_quit_confirm {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            return Ok(WizardOutcome::Quit);
                        }
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                            shell.show_quit_confirm = false;
                        }
                        _ => {}
                    }
                    continue;
                }

                match shell.handle_key(key) {
                    StepAction::Stay => {}
                    StepAction::Quit => shell.show_quit_confirm = true,
                    StepAction::Complete(outcome) => return Ok(outcome),
                }
            }
        }
    }
}

// ============================================================================
// Rendering Helpers
// ============================================================================

/// Create a centered rectangle with fixed dimensions
fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Accent colour per step
fn step_color(step: usize) -> Color {
    match step {
        0 | 1 => Color::Green,
        2 | 3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::LightGreen,
    }
}

// ============================================================================
// Main Rendering Functions
// ============================================================================

fn render_wizard(f: &mut Frame, shell: &WizardShell) {
    let area = f.area();
    let controller = shell.controller();
    let view = controller.view();

    let logo_height = 8u16;
    let hint_height = 1u16;
    let box_width = 66u16;
    let ideal_box_height = 26u16;
    let box_height =
        ideal_box_height.min(area.height.saturating_sub(logo_height + hint_height + 2));

    let total_height = logo_height + box_height + hint_height;
    let x = area.width.saturating_sub(box_width) / 2;
    let y = area.height.saturating_sub(total_height) / 2;

    let logo_area = Rect::new(x, y, box_width.min(area.width), logo_height);
    render_logo(f, logo_area);

    let box_y = y + logo_height;
    let box_area = Rect::new(x, box_y, box_width.min(area.width), box_height.max(10));
    f.render_widget(Clear, box_area);

    let color = step_color(view.step);
    let step_title = controller
        .catalog()
        .step(view.step)
        .map(|s| s.title.as_str())
        .unwrap_or("Unknown");
    let title_text = format!(
        " Step {}/{} \u{00b7} {} ",
        view.step_label,
        controller.total_steps(),
        step_title
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title_text)
        .title_style(Style::default().fg(color).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_step(f, chunks[0], shell, color);
    render_nav_button(f, chunks[1], shell);
    render_progress(f, chunks[2], view, color);

    let hint_y = box_area.y + box_area.height;
    let hint_area = Rect::new(x, hint_y, box_width.min(area.width), 1);
    render_help_bar(f, hint_area, shell);

    if shell.show_quit_confirm {
        render_quit_confirm_overlay(f);
    }
}

fn render_logo(f: &mut Frame, area: Rect) {
    let green = Style::default().fg(Color::Green).bold();
    let logo_lines = vec![
        Line::from(Span::styled(" ██████╗██████╗  ██████╗ ██████╗ ", green)),
        Line::from(Span::styled("██╔════╝██╔══██╗██╔═══██╗██╔══██╗", green)),
        Line::from(Span::styled("██║     ██████╔╝██║   ██║██████╔╝", green)),
        Line::from(Span::styled("██║     ██╔══██╗██║   ██║██╔═══╝ ", green)),
        Line::from(Span::styled("╚██████╗██║  ██║╚██████╔╝██║     ", green)),
        Line::from(Span::styled(" ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝  SENSE", green)),
        Line::from(""),
        Line::from(vec![
            Span::styled("🌾 ", Style::default().fg(Color::Yellow).bold()),
            Span::styled(
                "Field observations in, agronomy advice out",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let logo_paragraph = Paragraph::new(logo_lines).alignment(Alignment::Center);
    f.render_widget(logo_paragraph, area);
}

fn render_step(f: &mut Frame, area: Rect, shell: &WizardShell, color: Color) {
    let controller = shell.controller();
    let view = controller.view();
    let inputs = controller.inputs();

    let prompt = controller
        .catalog()
        .step(view.step)
        .map(|s| s.prompt.as_str())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", prompt),
            Style::default().fg(Color::DarkGray).bold(),
        )),
    ];

    for (row, control) in shell.visible_controls().iter().enumerate() {
        let focused = row == shell.focus;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(color).bold()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, control.label()),
            label_style,
        )));
        lines.push(control_line(control, view, inputs, color));
    }

    if shell.blocked_hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Complete every field on this step to continue",
            Style::default().fg(Color::Red),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn control_line(
    control: &Control,
    view: &ViewState,
    inputs: &CropInputs,
    color: Color,
) -> Line<'static> {
    let selected_style = Style::default().fg(Color::Black).bg(color).bold();
    let plain = Style::default().fg(Color::Gray);

    match control {
        Control::Tiles { field, options, .. } => {
            let selected = view.selected(*field);
            let mut spans = vec![Span::raw("    ")];
            for (i, option) in options.iter().enumerate() {
                let style = if selected == Some(i) {
                    selected_style
                } else {
                    plain
                };
                spans.push(Span::styled(format!(" {} ", option), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        }
        Control::Radio { treatment, .. } => {
            let answer = match treatment {
                Treatment::Fertilizer => inputs.used_fertilizer,
                Treatment::Pesticide => inputs.used_pesticide,
                Treatment::Fungicide => inputs.used_fungicide,
            };
            let (yes, no) = if answer.is_yes() {
                (selected_style, plain)
            } else {
                (plain, selected_style)
            };
            Line::from(vec![
                Span::raw("    "),
                Span::styled(" Yes ", yes),
                Span::raw(" "),
                Span::styled(" No ", no),
            ])
        }
        Control::Slider { slider, .. } => {
            let (min, max, _) = slider.range();
            let value = match slider {
                Slider::LeafYellow => f64::from(inputs.leaf_yellow_percent),
                Slider::Rainfall => inputs.rainfall_15,
                Slider::FertilizerQty => inputs.fertilizer_qty,
                Slider::PesticideQty => inputs.pesticide_qty,
            };
            let width = 30usize;
            let filled = (((value - min) / (max - min)) * width as f64).round() as usize;
            let filled = filled.min(width);
            let shown = view
                .displayed(DisplayedControl::Slider(*slider))
                .map(str::to_string)
                .unwrap_or_else(|| "not set".to_string());
            // Leaf yellow and rainfall texts already carry their unit
            let unit = match slider {
                Slider::FertilizerQty | Slider::PesticideQty => slider.unit(),
                Slider::LeafYellow | Slider::Rainfall => "",
            };
            Line::from(vec![
                Span::raw("    "),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled("░".repeat(width - filled), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("  {} ", shown), Style::default().fg(Color::White).bold()),
                Span::styled(unit, Style::default().fg(Color::DarkGray)),
            ])
        }
        Control::Bounded { field, .. } => {
            let shown = view
                .displayed(DisplayedControl::Bounded(*field))
                .map(str::to_string)
                .unwrap_or_else(|| "0".to_string());
            Line::from(vec![
                Span::styled("    Value: ", Style::default().fg(Color::DarkGray)),
                Span::styled(shown, Style::default().fg(Color::White).bold()),
                Span::styled("\u{258c}", Style::default().fg(color)),
            ])
        }
    }
}

fn render_nav_button(f: &mut Frame, area: Rect, shell: &WizardShell) {
    let view = shell.controller().view();
    let mut spans = Vec::new();
    if view.prev_visible {
        spans.push(Span::styled(
            " ◂ Previous ",
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw("   "));
    }
    let style = if view.nav_enabled {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!(" {} ▸ ", view.nav_label), style));
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_progress(f: &mut Frame, area: Rect, view: &ViewState, color: Color) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(view.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", view.progress * 100.0));
    f.render_widget(gauge, area);
}

fn render_help_bar(f: &mut Frame, area: Rect, shell: &WizardShell) {
    let controller = shell.controller();
    let mut spans = vec![];

    spans.push(Span::styled("  Enter", Style::default().fg(Color::Cyan)));
    if controller.current_step() == FINAL_STEP {
        spans.push(Span::styled(" submit  ", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(" next  ", Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::styled("↑↓", Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(" field  ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled("←→", Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(" change  ", Style::default().fg(Color::DarkGray)));

    if matches!(shell.focused_control(), Some(Control::Bounded { .. })) {
        spans.push(Span::styled("0-9", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(" type  ", Style::default().fg(Color::DarkGray)));
    }

    if controller.current_step() > 0 {
        spans.push(Span::styled("Bksp", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(" back  ", Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::styled("Q/Esc", Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(" quit", Style::default().fg(Color::DarkGray)));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Quit Wizard? ")
        .title_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Your answers will not be sent.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("      ", Style::default()),
            Span::styled("Y", Style::default().fg(Color::Cyan)),
            Span::styled(" yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    f.render_widget(Paragraph::new(content), inner);
}
