//! Add-candidate form — full-width pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{
  App, Banner, EDUCATION_FIELDS, FORM_FIELDS, FormFocus, FormPhase, WORK_FIELDS,
};

const FIELD_LABELS: [&str; FORM_FIELDS.len()] =
  ["First name", "Last name", "Email", "Phone", "Address"];
const EDUCATION_LABELS: [&str; EDUCATION_FIELDS.len()] =
  ["Institution", "Title", "Start date", "End date"];
const WORK_LABELS: [&str; WORK_FIELDS.len()] =
  ["Company", "Position", "Description", "Start date", "End date"];

/// Render the add-candidate form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.form;
  let focus_active = form.phase != FormPhase::Success;

  let title = match form.phase {
    FormPhase::Editing => " Add candidate ",
    FormPhase::Submitting => " Add candidate — submitting… ",
    FormPhase::Success => " Add candidate — saved ",
    FormPhase::Failed => " Add candidate — failed ",
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  let mut focused_line = 0usize;

  for (i, key) in FORM_FIELDS.iter().copied().enumerate() {
    let focused = focus_active && form.focus == FormFocus::Scalar(i);
    if focused {
      focused_line = lines.len();
    }
    lines.push(field_line(
      FIELD_LABELS[i],
      &form.values[i],
      focused,
      form.field_errors.get(key),
    ));
  }

  for (entry, values) in form.educations.iter().enumerate() {
    lines.push(Line::default());
    lines.push(section_line(format!("Education #{}", entry + 1)));
    for (field, key) in EDUCATION_FIELDS.iter().copied().enumerate() {
      let focused =
        focus_active && form.focus == (FormFocus::Education { entry, field });
      if focused {
        focused_line = lines.len();
      }
      let error_key = format!("educations[{entry}].{key}");
      lines.push(field_line(
        EDUCATION_LABELS[field],
        &values[field],
        focused,
        form.field_errors.get(&error_key),
      ));
    }
  }

  for (entry, values) in form.work_experiences.iter().enumerate() {
    lines.push(Line::default());
    lines.push(section_line(format!("Work experience #{}", entry + 1)));
    for (field, key) in WORK_FIELDS.iter().copied().enumerate() {
      let focused = focus_active && form.focus == (FormFocus::Work { entry, field });
      if focused {
        focused_line = lines.len();
      }
      let error_key = format!("workExperiences[{entry}].{key}");
      lines.push(field_line(
        WORK_LABELS[field],
        &values[field],
        focused,
        form.field_errors.get(&error_key),
      ));
    }
  }

  lines.push(Line::default());
  lines.push(Line::from(Span::styled(
    "^E add education   ^W add experience   ^D remove section",
    Style::default().fg(Color::DarkGray),
  )));

  if let Some(banner) = &form.banner {
    let (text, style) = match banner {
      Banner::Success(msg) => (msg.as_str(), Style::default().fg(Color::Green)),
      Banner::Failure(msg) => (msg.as_str(), Style::default().fg(Color::Red)),
    };
    lines.push(Line::from(Span::styled(text, style)));
  }

  // Keep the focused row on screen when the form outgrows the pane.
  let height = inner.height as usize;
  let scroll = focused_line.saturating_sub(height.saturating_sub(3));

  f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
}

fn section_line(text: String) -> Line<'static> {
  Line::from(Span::styled(
    text,
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn field_line(
  label: &str,
  value: &str,
  focused: bool,
  error: Option<&str>,
) -> Line<'static> {
  let label_style = if focused {
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let cursor = if focused { "_" } else { "" };

  let mut spans = vec![
    Span::styled(format!("{label:<12}"), label_style),
    Span::raw(format!("{value}{cursor}")),
  ];
  if let Some(message) = error {
    spans.push(Span::styled(
      format!("   ✗ {message}"),
      Style::default().fg(Color::Red),
    ));
  }

  Line::from(spans)
}
