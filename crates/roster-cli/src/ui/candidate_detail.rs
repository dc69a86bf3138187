//! Candidate detail pane — right panel.

use chrono::NaiveDate;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

fn date_range(start: NaiveDate, end: Option<NaiveDate>) -> String {
  match end {
    Some(end) => format!("{start} — {end}"),
    None => format!("{start} — present"),
  }
}

fn label(text: &str) -> Span<'_> {
  Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn section(text: &str) -> Line<'_> {
  Line::from(Span::styled(
    text,
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

/// Render the candidate profile into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(profile) = &app.detail else {
    return;
  };
  let candidate = &profile.candidate;

  let block = Block::default()
    .title(format!(
      " {} {} (#{}) ",
      candidate.first_name, candidate.last_name, candidate.id
    ))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut lines: Vec<Line> = Vec::new();

  lines.push(Line::from(vec![
    label("email    "),
    Span::raw(candidate.email.clone()),
  ]));
  if let Some(phone) = &candidate.phone {
    lines.push(Line::from(vec![label("phone    "), Span::raw(phone.clone())]));
  }
  if let Some(address) = &candidate.address {
    lines.push(Line::from(vec![label("address  "), Span::raw(address.clone())]));
  }

  if !profile.educations.is_empty() {
    lines.push(Line::default());
    lines.push(section("Education"));
    for education in &profile.educations {
      let mut text = education.institution.clone();
      if let Some(title) = &education.title {
        text.push_str(&format!(" — {title}"));
      }
      lines.push(Line::from(vec![Span::raw("  "), Span::raw(text)]));
      lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
          date_range(education.start_date, education.end_date),
          Style::default().fg(Color::DarkGray),
        ),
      ]));
    }
  }

  if !profile.work_experiences.is_empty() {
    lines.push(Line::default());
    lines.push(section("Work experience"));
    for experience in &profile.work_experiences {
      lines.push(Line::from(vec![
        Span::raw("  "),
        Span::raw(format!("{} — {}", experience.company, experience.position)),
      ]));
      lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
          date_range(experience.start_date, experience.end_date),
          Style::default().fg(Color::DarkGray),
        ),
      ]));
      if let Some(description) = &experience.description {
        lines.push(Line::from(vec![
          Span::raw("    "),
          Span::styled(description.clone(), Style::default().fg(Color::Gray)),
        ]));
      }
    }
  }

  if let Some(resume) = &profile.resume {
    lines.push(Line::default());
    lines.push(section("Résumé"));
    lines.push(Line::from(vec![
      Span::raw("  "),
      Span::raw(format!("{} ({})", resume.file_path, resume.file_type)),
    ]));
    lines.push(Line::from(vec![
      Span::raw("  "),
      Span::styled(
        format!("uploaded {}", resume.upload_date.format("%Y-%m-%d %H:%M UTC")),
        Style::default().fg(Color::DarkGray),
      ),
    ]));
  }

  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(lines).scroll((app.detail_scroll as u16, 0)),
    inner,
  );
}
