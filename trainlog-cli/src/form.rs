//! State of the interactive training form and its key handling.
//!
//! Rendering lives in `ui`; everything here can be driven without a terminal.

use std::path::PathBuf;

use crossterm::event::KeyCode;
use log::{debug, warn};
use tokio::task::JoinHandle;
use trainlog::catalog::{CatalogClient, CatalogSnapshot};
use trainlog::export;
use trainlog::session::{AppState, ExerciseDraft, TrainingDraft};
use trainlog::{CatalogEntry, Exercise, Training};

pub const NORMAL_HELP: &str =
    "n: name | a: add exercise | s: save training | j/k: navigate | o: sort | e: export | q: quit";
pub const NAME_HELP: &str = "Type the training name, Enter/Esc: done";
pub const MODAL_HELP: &str =
    "Tab: next field | Up/Down: pick suggestion | Enter: select/save | Esc: cancel";

pub enum CatalogState {
    Loading(JoinHandle<CatalogSnapshot>),
    Ready(CatalogSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    Name,
    Sets,
    Reps,
    Weight,
}

impl ExerciseField {
    fn next(self) -> Self {
        match self {
            ExerciseField::Name => ExerciseField::Sets,
            ExerciseField::Sets => ExerciseField::Reps,
            ExerciseField::Reps => ExerciseField::Weight,
            ExerciseField::Weight => ExerciseField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            ExerciseField::Name => ExerciseField::Weight,
            ExerciseField::Sets => ExerciseField::Name,
            ExerciseField::Reps => ExerciseField::Sets,
            ExerciseField::Weight => ExerciseField::Reps,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseField::Name => "Search Exercise",
            ExerciseField::Sets => "Sets",
            ExerciseField::Reps => "Reps",
            ExerciseField::Weight => "Weight (kg)",
        }
    }
}

pub enum ModalAction {
    Continue,
    Cancel,
    Save(Exercise),
}

/// The "add exercise" dialog. Its catalog snapshot is fetched once when the
/// dialog opens and dropped with it.
pub struct ExerciseModal {
    pub draft: ExerciseDraft,
    pub field: ExerciseField,
    pub catalog: CatalogState,
    pub searching: bool,
    pub highlighted: usize,
    pub error: Option<String>,
}

impl ExerciseModal {
    pub fn open(client: &CatalogClient) -> Self {
        let client = client.clone();
        let handle = tokio::spawn(async move { client.fetch_snapshot().await });
        Self::with_catalog(CatalogState::Loading(handle))
    }

    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self::with_catalog(CatalogState::Ready(snapshot))
    }

    fn with_catalog(catalog: CatalogState) -> Self {
        Self {
            draft: ExerciseDraft::default(),
            field: ExerciseField::Name,
            catalog,
            searching: false,
            highlighted: 0,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.catalog, CatalogState::Loading(_))
    }

    /// Resolves the catalog fetch once it has finished; never waits on it.
    pub async fn poll_catalog(&mut self) {
        let finished = matches!(&self.catalog, CatalogState::Loading(handle) if handle.is_finished());
        if !finished {
            return;
        }
        let state = std::mem::replace(
            &mut self.catalog,
            CatalogState::Ready(CatalogSnapshot::empty()),
        );
        if let CatalogState::Loading(handle) = state {
            let snapshot = handle.await.unwrap_or_else(|e| {
                warn!("Catalog task failed: {}", e);
                CatalogSnapshot::empty()
            });
            debug!("Catalog snapshot ready with {} entries", snapshot.len());
            self.catalog = CatalogState::Ready(snapshot);
        }
    }

    /// Matches for the search text, shown only while the user is typing a name.
    pub fn suggestions(&self) -> Vec<CatalogEntry> {
        match &self.catalog {
            CatalogState::Ready(snapshot)
                if self.searching
                    && self.field == ExerciseField::Name
                    && !snapshot.is_empty() =>
            {
                snapshot.search(&self.draft.name)
            }
            _ => Vec::new(),
        }
    }

    pub fn value(&self, field: ExerciseField) -> &str {
        match field {
            ExerciseField::Name => &self.draft.name,
            ExerciseField::Sets => &self.draft.sets,
            ExerciseField::Reps => &self.draft.reps,
            ExerciseField::Weight => &self.draft.weight,
        }
    }

    fn active_value(&mut self) -> &mut String {
        match self.field {
            ExerciseField::Name => &mut self.draft.name,
            ExerciseField::Sets => &mut self.draft.sets,
            ExerciseField::Reps => &mut self.draft.reps,
            ExerciseField::Weight => &mut self.draft.weight,
        }
    }

    /// Suggestions belong to the name field and close when focus leaves it.
    fn focus(&mut self, field: ExerciseField) {
        if field != ExerciseField::Name {
            self.searching = false;
            self.highlighted = 0;
        }
        self.field = field;
    }

    fn select(&mut self, entry: CatalogEntry) {
        self.draft.name = entry.name;
        self.focus(ExerciseField::Sets);
    }

    fn edited(&mut self) {
        self.error = None;
        if self.field == ExerciseField::Name {
            self.searching = true;
            self.highlighted = 0;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> ModalAction {
        let suggestions = if self.field == ExerciseField::Name {
            self.suggestions()
        } else {
            Vec::new()
        };

        match code {
            KeyCode::Esc => return ModalAction::Cancel,
            KeyCode::Tab => self.focus(self.field.next()),
            KeyCode::BackTab => self.focus(self.field.prev()),
            KeyCode::Down if !suggestions.is_empty() => {
                self.highlighted = (self.highlighted + 1).min(suggestions.len() - 1);
            }
            KeyCode::Up if !suggestions.is_empty() => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            KeyCode::Down => self.focus(self.field.next()),
            KeyCode::Up => self.focus(self.field.prev()),
            KeyCode::Enter => {
                if let Some(entry) = suggestions.into_iter().nth(self.highlighted) {
                    self.select(entry);
                    return ModalAction::Continue;
                }
                match self.draft.validate() {
                    Ok(exercise) => return ModalAction::Save(exercise),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            KeyCode::Char(c) => {
                let numeric = self.field != ExerciseField::Name;
                if !numeric || c.is_ascii_digit() || c == '.' || c == '-' {
                    self.active_value().push(c);
                    self.edited();
                }
            }
            KeyCode::Backspace => {
                self.active_value().pop();
                self.edited();
            }
            _ => {}
        }
        ModalAction::Continue
    }
}

pub enum Mode {
    Normal,
    EditingName,
    AddingExercise(ExerciseModal),
}

pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub draft: TrainingDraft,
    pub client: CatalogClient,
    pub export_dir: PathBuf,
    pub selected: usize,
    pub mode: Mode,
    pub status_message: String,
}

impl App {
    pub fn new(client: CatalogClient, export_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(),
            draft: TrainingDraft::default(),
            client,
            export_dir,
            selected: 0,
            mode: Mode::Normal,
            status_message: NORMAL_HELP.to_string(),
        }
    }

    /// Trainings as the list shows them.
    pub fn sorted_trainings(&self) -> Vec<Training> {
        self.state.sorted()
    }

    pub async fn poll(&mut self) {
        if let Mode::AddingExercise(modal) = &mut self.mode {
            modal.poll_catalog().await;
        }
    }

    fn scroll_down(&mut self) {
        let len = self.state.trainings().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn save_training(&mut self) {
        match self.state.submit(&mut self.draft) {
            Ok(training) => {
                self.status_message = format!("Saved training: {}", training.name());
            }
            Err(e) => {
                self.status_message = format!("Cannot save training: {}", e);
            }
        }
    }

    fn toggle_sort(&mut self) {
        let order = self.state.toggle_sort();
        self.selected = 0;
        self.status_message = format!("Sorted by volume ({})", order);
    }

    fn export_selected(&mut self) {
        let trainings = self.sorted_trainings();
        let Some(training) = trainings.get(self.selected) else {
            self.status_message = "No training to export".to_string();
            return;
        };
        self.status_message = match export::write_to_dir(training, &self.export_dir) {
            Ok(path) => format!("Exported {}", path.display()),
            Err(e) => format!("Export failed: {:#}", e),
        };
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        match &mut self.mode {
            Mode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
                KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.mode = Mode::EditingName;
                    self.status_message = NAME_HELP.to_string();
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.mode = Mode::AddingExercise(ExerciseModal::open(&self.client));
                    self.status_message = MODAL_HELP.to_string();
                }
                KeyCode::Char('s') | KeyCode::Char('S') => self.save_training(),
                KeyCode::Char('o') | KeyCode::Char('O') => self.toggle_sort(),
                KeyCode::Char('e') | KeyCode::Char('E') => self.export_selected(),
                _ => {}
            },
            Mode::EditingName => match code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.mode = Mode::Normal;
                    self.status_message = NORMAL_HELP.to_string();
                }
                KeyCode::Char(c) => self.draft.name.push(c),
                KeyCode::Backspace => {
                    self.draft.name.pop();
                }
                _ => {}
            },
            Mode::AddingExercise(modal) => match modal.handle_key(code) {
                ModalAction::Continue => {}
                ModalAction::Cancel => {
                    self.mode = Mode::Normal;
                    self.status_message = NORMAL_HELP.to_string();
                }
                ModalAction::Save(exercise) => {
                    self.status_message = format!("Added exercise: {}", exercise);
                    self.draft.add_exercise(exercise);
                    self.mode = Mode::Normal;
                }
            },
        }
        Flow::Continue
    }
}
