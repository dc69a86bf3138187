//! Application state machine and event dispatcher.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use roster_core::{
  FieldErrors,
  domain::{Candidate, CandidateId, CandidateProfile},
  submission::{CandidateSubmission, EducationEntry, WorkExperienceEntry},
  validate::{ValidationOptions, validate_submission},
};

use crate::client::{ApiClient, SubmitError};

/// How long the success banner is shown before returning to the list.
pub const NAVIGATE_DELAY: Duration = Duration::from_secs(2);

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the roster list; right pane is empty or shows a preview.
  RosterList,
  /// Focus on the candidate detail pane.
  CandidateDetail,
  /// The add-candidate form.
  AddForm,
}

// ─── Add form ─────────────────────────────────────────────────────────────────

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
  Editing,
  Submitting,
  Success,
  Failed,
}

/// Banner shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
  Success(String),
  Failure(String),
}

/// Scalar form fields in focus order; keys match the API's field-error map.
pub const FORM_FIELDS: [&str; 5] = ["firstName", "lastName", "email", "phone", "address"];

/// Field keys of one education section.
pub const EDUCATION_FIELDS: [&str; 4] = ["institution", "title", "startDate", "endDate"];

/// Field keys of one work-experience section.
pub const WORK_FIELDS: [&str; 5] =
  ["company", "position", "description", "startDate", "endDate"];

/// Position of the form cursor: a scalar field or a field inside one of the
/// repeatable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
  Scalar(usize),
  Education { entry: usize, field: usize },
  Work { entry: usize, field: usize },
}

/// The add-candidate form: values, focus, phase, and per-field errors.
///
/// Education and work-experience sections can be added and removed while
/// editing, mirroring the web form. Dates are typed as `YYYY-MM-DD` text and
/// parsed on submit. Editing a field clears that field's error only; the
/// others stay until their fields are edited or the next submit replaces the
/// map.
pub struct AddForm {
  pub phase:            FormPhase,
  pub values:           [String; FORM_FIELDS.len()],
  pub educations:       Vec<[String; EDUCATION_FIELDS.len()]>,
  pub work_experiences: Vec<[String; WORK_FIELDS.len()]>,
  pub focus:            FormFocus,
  pub field_errors:     FieldErrors,
  pub banner:           Option<Banner>,
  /// When set, the app returns to the list at this instant. Cleared by
  /// [`AddForm::reset`], which cancels the pending navigation.
  pub navigate_at:      Option<Instant>,
}

impl AddForm {
  pub fn new() -> Self {
    Self {
      phase:            FormPhase::Editing,
      values:           Default::default(),
      educations:       Vec::new(),
      work_experiences: Vec::new(),
      focus:            FormFocus::Scalar(0),
      field_errors:     FieldErrors::default(),
      banner:           None,
      navigate_at:      None,
    }
  }

  pub fn reset(&mut self) {
    *self = Self::new();
  }

  /// Error-map key of the focused field, e.g. `educations[0].institution`.
  pub fn focused_field(&self) -> String {
    match self.focus {
      FormFocus::Scalar(i) => FORM_FIELDS[i].to_owned(),
      FormFocus::Education { entry, field } => {
        format!("educations[{entry}].{}", EDUCATION_FIELDS[field])
      }
      FormFocus::Work { entry, field } => {
        format!("workExperiences[{entry}].{}", WORK_FIELDS[field])
      }
    }
  }

  /// All focusable fields, in tab order: scalars, then each education
  /// section, then each work-experience section.
  fn field_order(&self) -> Vec<FormFocus> {
    let mut order: Vec<FormFocus> =
      (0..FORM_FIELDS.len()).map(FormFocus::Scalar).collect();
    for entry in 0..self.educations.len() {
      for field in 0..EDUCATION_FIELDS.len() {
        order.push(FormFocus::Education { entry, field });
      }
    }
    for entry in 0..self.work_experiences.len() {
      for field in 0..WORK_FIELDS.len() {
        order.push(FormFocus::Work { entry, field });
      }
    }
    order
  }

  pub fn focus_next(&mut self) {
    let order = self.field_order();
    let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
    self.focus = order[(pos + 1) % order.len()];
  }

  pub fn focus_prev(&mut self) {
    let order = self.field_order();
    let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
    self.focus = order[(pos + order.len() - 1) % order.len()];
  }

  /// Whether the form currently accepts edits.
  fn editable(&self) -> bool {
    matches!(self.phase, FormPhase::Editing | FormPhase::Failed)
  }

  fn focused_value_mut(&mut self) -> &mut String {
    match self.focus {
      FormFocus::Scalar(i) => &mut self.values[i],
      FormFocus::Education { entry, field } => &mut self.educations[entry][field],
      FormFocus::Work { entry, field } => &mut self.work_experiences[entry][field],
    }
  }

  /// An edit returns a failed form to editing and clears only the edited
  /// field's error.
  fn on_edit(&mut self) {
    if self.phase == FormPhase::Failed {
      self.phase = FormPhase::Editing;
    }
    let field = self.focused_field();
    self.field_errors.remove(&field);
  }

  pub fn insert_char(&mut self, c: char) {
    if !self.editable() {
      return;
    }
    self.focused_value_mut().push(c);
    self.on_edit();
  }

  pub fn delete_char(&mut self) {
    if !self.editable() {
      return;
    }
    self.focused_value_mut().pop();
    self.on_edit();
  }

  // ── Sections ──────────────────────────────────────────────────────────────

  /// Append a blank education section and focus its first field.
  pub fn add_education(&mut self) {
    if !self.editable() {
      return;
    }
    self.educations.push(Default::default());
    self.focus = FormFocus::Education {
      entry: self.educations.len() - 1,
      field: 0,
    };
  }

  /// Append a blank work-experience section and focus its first field.
  pub fn add_work_experience(&mut self) {
    if !self.editable() {
      return;
    }
    self.work_experiences.push(Default::default());
    self.focus = FormFocus::Work {
      entry: self.work_experiences.len() - 1,
      field: 0,
    };
  }

  /// Remove the section under the cursor. No-op on scalar fields.
  ///
  /// Removal shifts the indices of later sections, so all indexed errors for
  /// that collection are dropped; the next submit recomputes them.
  pub fn remove_focused_section(&mut self) {
    if !self.editable() {
      return;
    }
    match self.focus {
      FormFocus::Scalar(_) => {}
      FormFocus::Education { entry, .. } => {
        self.educations.remove(entry);
        self.drop_errors_with_prefix("educations[");
        self.focus = if self.educations.is_empty() {
          FormFocus::Scalar(0)
        } else {
          FormFocus::Education {
            entry: entry.min(self.educations.len() - 1),
            field: 0,
          }
        };
      }
      FormFocus::Work { entry, .. } => {
        self.work_experiences.remove(entry);
        self.drop_errors_with_prefix("workExperiences[");
        self.focus = if self.work_experiences.is_empty() {
          FormFocus::Scalar(0)
        } else {
          FormFocus::Work {
            entry: entry.min(self.work_experiences.len() - 1),
            field: 0,
          }
        };
      }
    }
  }

  fn drop_errors_with_prefix(&mut self, prefix: &str) {
    let mut kept = FieldErrors::default();
    for (field, message) in self.field_errors.iter() {
      if !field.starts_with(prefix) {
        kept.push(field, message);
      }
    }
    self.field_errors = kept;
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// The submission as currently typed, plus errors for any non-blank date
  /// text that does not parse. Blank fields are absent.
  pub fn submission(&self) -> (CandidateSubmission, FieldErrors) {
    let mut date_errors = FieldErrors::default();

    let mut educations = Vec::with_capacity(self.educations.len());
    for (i, entry) in self.educations.iter().enumerate() {
      educations.push(EducationEntry {
        institution: field_value(&entry[0]),
        title:       field_value(&entry[1]),
        start_date:  parse_date(
          &entry[2],
          format!("educations[{i}].startDate"),
          &mut date_errors,
        ),
        end_date:    parse_date(
          &entry[3],
          format!("educations[{i}].endDate"),
          &mut date_errors,
        ),
      });
    }

    let mut work_experiences = Vec::with_capacity(self.work_experiences.len());
    for (i, entry) in self.work_experiences.iter().enumerate() {
      work_experiences.push(WorkExperienceEntry {
        company:     field_value(&entry[0]),
        position:    field_value(&entry[1]),
        description: field_value(&entry[2]),
        start_date:  parse_date(
          &entry[3],
          format!("workExperiences[{i}].startDate"),
          &mut date_errors,
        ),
        end_date:    parse_date(
          &entry[4],
          format!("workExperiences[{i}].endDate"),
          &mut date_errors,
        ),
      });
    }

    let submission = CandidateSubmission {
      first_name: field_value(&self.values[0]),
      last_name: field_value(&self.values[1]),
      email: field_value(&self.values[2]),
      phone: field_value(&self.values[3]),
      address: field_value(&self.values[4]),
      educations,
      work_experiences,
      ..Default::default()
    };
    (submission, date_errors)
  }

  /// Validate locally and, if acceptable, enter the submitting phase.
  ///
  /// Returns the submission to send, or `None` when validation failed (the
  /// field-error map is populated), a submit is already in flight, or the
  /// form has already succeeded.
  pub fn prepare_submit(&mut self, require_phone: bool) -> Option<CandidateSubmission> {
    if !self.editable() {
      return None;
    }
    let (submission, date_errors) = self.submission();
    let mut errors =
      match validate_submission(&submission, ValidationOptions { require_phone }) {
        Ok(_) => FieldErrors::default(),
        Err(errors) => errors,
      };
    // An unparsed date deserializes as absent, so the date error replaces
    // the weaker "required" message for the same field.
    for (field, message) in date_errors.iter() {
      errors.push(field, message);
    }

    if errors.is_empty() {
      self.field_errors = FieldErrors::default();
      self.banner = None;
      self.phase = FormPhase::Submitting;
      Some(submission)
    } else {
      self.field_errors = errors;
      self.phase = FormPhase::Editing;
      None
    }
  }

  /// Record the outcome of the in-flight submission.
  ///
  /// Success schedules the return to the list; failure re-opens the form for
  /// editing with the server's message in the banner.
  pub fn finish_submit(&mut self, result: Result<CandidateProfile, SubmitError>) {
    match result {
      Ok(_) => {
        self.phase = FormPhase::Success;
        self.banner = Some(Banner::Success("Candidate added successfully".to_owned()));
        self.navigate_at = Some(Instant::now() + NAVIGATE_DELAY);
      }
      Err(SubmitError::Rejected { message, errors }) => {
        self.phase = FormPhase::Failed;
        self.field_errors = errors;
        self.banner = Some(Banner::Failure(format!("Failed to add candidate: {message}")));
      }
      Err(SubmitError::Failed(message)) => {
        self.phase = FormPhase::Failed;
        self.banner = Some(Banner::Failure(format!("Failed to add candidate: {message}")));
      }
    }
  }
}

/// Trimmed value of a text input; blank collapses to absent.
fn field_value(text: &str) -> Option<String> {
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_owned())
}

/// Parse `YYYY-MM-DD` text, recording an error under `field` when non-blank
/// text does not parse.
fn parse_date(text: &str, field: String, errors: &mut FieldErrors) -> Option<NaiveDate> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }
  match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
    Ok(date) => Some(date),
    Err(_) => {
      errors.push(field, "invalid date, use YYYY-MM-DD");
      None
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// All candidates returned by the API on startup or reload.
  pub candidates: Vec<Candidate>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* candidate list.
  pub list_cursor: usize,

  /// Profile shown in the detail pane.
  pub detail: Option<CandidateProfile>,

  /// Scroll offset within the detail pane.
  pub detail_scroll: usize,

  /// The add-candidate form.
  pub form: AddForm,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Presentation-layer policy: whether the form requires a phone number.
  pub require_phone: bool,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with an empty roster.
  pub fn new(client: ApiClient, require_phone: bool) -> Self {
    Self {
      screen: Screen::RosterList,
      candidates: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail: None,
      detail_scroll: 0,
      form: AddForm::new(),
      status_msg: String::new(),
      require_phone,
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all candidates from the API and populate `self.candidates`.
  pub async fn load_candidates(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading candidates…".into();
    match self.client.list_candidates().await {
      Ok(candidates) => {
        self.candidates = candidates;
        self.list_cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Load the full profile for `id` into the detail pane.
  async fn load_detail(&mut self, id: CandidateId) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    match self.client.get_candidate(id).await {
      Ok(profile) => {
        self.detail = Some(profile);
        self.detail_scroll = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Returns candidates that match the current filter query.
  pub fn filtered_candidates(&self) -> Vec<&Candidate> {
    if self.filter.is_empty() {
      return self.candidates.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .candidates
      .iter()
      .filter(|c| {
        let haystack = format!("{} {} {}", c.first_name, c.last_name, c.email);
        matcher.fuzzy_match(&haystack, &self.filter).is_some()
      })
      .collect()
  }

  /// The candidate under the list cursor in the filtered view, if any.
  pub fn cursor_candidate(&self) -> Option<&Candidate> {
    let list = self.filtered_candidates();
    list.get(self.list_cursor).copied()
  }

  // ── Timer ─────────────────────────────────────────────────────────────────

  /// Advance time-driven transitions; called once per event-loop iteration.
  ///
  /// Fires the scheduled return to the list after a successful submission.
  pub async fn on_tick(&mut self) -> anyhow::Result<()> {
    if self.screen == Screen::AddForm
      && self.form.navigate_at.is_some_and(|at| Instant::now() >= at)
    {
      self.leave_form();
      self.load_candidates().await?;
    }
    Ok(())
  }

  /// Leave the form and cancel any scheduled navigation.
  fn leave_form(&mut self) {
    self.form.reset();
    self.screen = Screen::RosterList;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return self.handle_filter_key(key);
    }

    match self.screen {
      Screen::RosterList => self.handle_list_key(key).await,
      Screen::CandidateDetail => self.handle_detail_key(key),
      Screen::AddForm => self.handle_form_key(key).await,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_candidates().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_candidate().map(|c| c.id) {
          self.load_detail(id).await?;
          self.screen = Screen::CandidateDetail;
        }
      }

      // Add candidate
      KeyCode::Char('a') => {
        self.form.reset();
        self.screen = Screen::AddForm;
      }

      // Reload
      KeyCode::Char('r') => {
        self.load_candidates().await?;
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::RosterList;
        self.detail = None;
        self.detail_scroll = 0;
      }

      // Scroll detail
      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll += 1;
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Leaving the form cancels the scheduled navigation.
      KeyCode::Esc => {
        self.leave_form();
        self.load_candidates().await.ok();
      }

      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),

      // Section management mirrors the web form's add/remove buttons.
      KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.form.add_education();
      }
      KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.form.add_work_experience();
      }
      KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.form.remove_focused_section();
      }

      KeyCode::Enter => {
        if let Some(submission) = self.form.prepare_submit(self.require_phone) {
          let result = self.client.create_candidate(&submission).await;
          self.form.finish_submit(result);
        }
      }

      KeyCode::Backspace => self.form.delete_char(),
      KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.form.insert_char(c);
      }

      _ => {}
    }
    Ok(true)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
