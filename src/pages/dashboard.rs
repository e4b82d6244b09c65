//! Dashboard Page
//!
//! Hosts the content generator and the mock learning overview: progress
//! ring, streak, recent activity, theme toggle, and navigation menus.
//! The page may sit behind the [`AuthGate`].

use std::f64::consts::PI;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::auth::{session_token, AuthGate, GateOutcome};
use crate::pipeline::{
    feature_display_name, feature_type_for, AbortController, FeatureType, GenerationOutput,
    GenerationPipeline, GenerationRequest, PipelineStage, SelectedFile, Trigger,
};
use crate::store::{KeyValueStore, StoreResult};

use super::notify::{Notice, Notifier};
use super::theme::{load_theme, save_theme, Theme};

/// Radius of the progress ring in SVG units
pub const RING_RADIUS: f64 = 70.0;

pub const PLACEHOLDER_EMPTY: &str = "Paste text or attach a file...";
pub const PLACEHOLDER_FILE: &str = "File attached. Add any extra context if needed...";

const CTA_IDLE_LABEL: &str = "Start Learning";
const CTA_LOADING_LABEL: &str = "Loading...";
const DEFAULT_GENERATOR_TITLE: &str = "Generate Summary";

/// Entry in the recent activity timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub icon: String,
    pub title: String,
    pub time: String,
}

impl Activity {
    fn new(icon: &str, title: &str, time: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            time: time.to_string(),
        }
    }
}

/// Mock learner data shown on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub name: String,
    /// Percent, 0..=100
    pub progress: u8,
    pub streak: u32,
    pub total_hours: u32,
    pub courses_completed: u32,
    pub recent_activity: Vec<Activity>,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            name: "Alex Chen".to_string(),
            progress: 68,
            streak: 12,
            total_hours: 47,
            courses_completed: 8,
            recent_activity: vec![
                Activity::new("🧠", "Completed AI Tutor Session", "2 hours ago"),
                Activity::new("📚", "Reviewed 25 Flashcards", "5 hours ago"),
                Activity::new("🎮", "Played Math Challenge Game", "Yesterday"),
                Activity::new("✨", "Generated Smart Summary", "2 days ago"),
                Activity::new("🏆", "Achieved 10-day Streak", "3 days ago"),
            ],
        }
    }
}

/// Geometry of the progress ring
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRing {
    pub circumference: f64,
    pub dash_offset: f64,
    pub label: String,
}

impl ProgressRing {
    pub fn new(progress: u8) -> Self {
        let progress = progress.min(100);
        let circumference = 2.0 * PI * RING_RADIUS;
        let dash_offset = circumference - (f64::from(progress) / 100.0) * circumference;
        Self {
            circumference,
            dash_offset,
            label: format!("{}%", progress),
        }
    }
}

/// Content of the result area
#[derive(Debug, Clone, PartialEq)]
pub enum ResultArea {
    Content(String),
    Error(String),
}

impl ResultArea {
    pub fn text(&self) -> &str {
        match self {
            ResultArea::Content(text) | ResultArea::Error(text) => text,
        }
    }
}

/// What a click on the generate button did
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// Pipeline finished and the result area shows the output
    Rendered(GenerationOutput),
    /// Pipeline failed with this user-facing message
    Failed(String),
    /// Neither text nor file; nothing was sent
    MissingInput,
    /// Trigger disabled by a run in flight; click ignored
    Busy,
    /// The auth gate redirected; the page no longer acts
    Redirected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub icon: String,
    pub title: String,
    pub time: String,
    /// Staggered entry animation
    pub animation_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorView {
    pub title: String,
    pub feature: FeatureType,
    pub source_text: String,
    pub placeholder: &'static str,
    /// Name in the file preview, `None` hides the preview
    pub file_name: Option<String>,
    pub button_label: &'static str,
    pub button_disabled: bool,
    /// `None` hides the result area
    pub result: Option<String>,
}

/// Rendered dashboard state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub theme: Theme,
    pub body_class: Option<&'static str>,
    pub theme_icon: &'static str,
    pub user_name: String,
    pub progress: ProgressRing,
    pub streak: u32,
    pub total_hours: u32,
    pub courses_completed: u32,
    pub activities: Vec<ActivityView>,
    pub avatar_open: bool,
    pub mobile_menu_open: bool,
    pub bottom_nav_active: usize,
    pub cta_label: &'static str,
    pub generator: GeneratorView,
    pub notice: Option<Notice>,
}

/// Controller for the dashboard page
pub struct DashboardController {
    store: Arc<dyn KeyValueStore>,
    pipeline: GenerationPipeline,
    gate: Option<AuthGate>,
    abort: Option<Arc<AbortController>>,
    redirected: bool,
    user: UserData,
    theme: Theme,
    avatar_open: bool,
    mobile_menu_open: bool,
    bottom_nav_active: usize,
    cta_loading: bool,
    cta_delay: Duration,
    feature: FeatureType,
    generator_title: String,
    source_text: String,
    selected_file: Option<SelectedFile>,
    result: Option<ResultArea>,
    trigger: Trigger,
    notifier: Notifier,
}

impl DashboardController {
    /// Initialize the page, restoring the saved theme
    pub fn new(store: Arc<dyn KeyValueStore>, pipeline: GenerationPipeline) -> Self {
        let theme = load_theme(store.as_ref());
        let user = UserData::default();

        tracing::info!(
            user = %user.name,
            progress = user.progress,
            streak = user.streak,
            "Dashboard initialized"
        );

        Self {
            store,
            pipeline,
            gate: None,
            abort: None,
            redirected: false,
            user,
            theme,
            avatar_open: false,
            mobile_menu_open: false,
            bottom_nav_active: 0,
            cta_loading: false,
            cta_delay: Duration::from_millis(1000),
            feature: FeatureType::default(),
            generator_title: DEFAULT_GENERATOR_TITLE.to_string(),
            source_text: String::new(),
            selected_file: None,
            result: None,
            trigger: Trigger::new(),
            notifier: Notifier::new(),
        }
    }

    /// Put the page behind a login
    pub fn with_gate(mut self, gate: AuthGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Let pipeline runs be aborted from outside.
    ///
    /// An abort cancels the run in flight, or the next one if none is. The
    /// controller is re-armed once that run settles.
    pub fn with_abort_controller(mut self, controller: Arc<AbortController>) -> Self {
        self.abort = Some(controller);
        self
    }

    pub fn with_cta_delay(mut self, delay: Duration) -> Self {
        self.cta_delay = delay;
        self
    }

    /// Run the auth gate, if any. `None` when the page is not gated.
    ///
    /// A [`GateOutcome::Redirect`] is terminal: every later handler on
    /// the page becomes a no-op.
    pub async fn authenticate(&mut self) -> Option<GateOutcome> {
        let gate = self.gate.as_ref()?;
        let outcome = gate.check(self.store.as_ref()).await;
        match &outcome {
            GateOutcome::Authenticated {
                display_name: Some(name),
                ..
            } => self.user.name = name.clone(),
            GateOutcome::Redirect { .. } => self.redirected = true,
            _ => {}
        }
        Some(outcome)
    }

    /// Whether the auth gate sent the learner away
    pub fn is_redirected(&self) -> bool {
        self.redirected
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user.name = name.into();
    }

    pub fn user(&self) -> &UserData {
        &self.user
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip and persist the theme
    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        if self.redirected {
            return Ok(self.theme);
        }
        self.theme = self.theme.toggled();
        save_theme(self.store.as_ref(), self.theme)?;
        Ok(self.theme)
    }

    pub fn toggle_avatar_menu(&mut self) {
        self.avatar_open = !self.avatar_open;
    }

    /// Click anywhere outside the dropdown
    pub fn close_menus(&mut self) {
        self.avatar_open = false;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn select_bottom_nav(&mut self, index: usize) {
        self.bottom_nav_active = index;
    }

    /// CTA click: show the loading label
    pub fn press_cta(&mut self) {
        if self.redirected {
            return;
        }
        self.cta_loading = true;
    }

    /// Restore the CTA after its delay and greet the learner
    pub async fn finish_cta(&mut self) {
        if !self.cta_loading {
            return;
        }
        tokio::time::sleep(self.cta_delay).await;
        self.cta_loading = false;
        self.notifier
            .success("🚀 Let's begin your learning journey!");
    }

    pub async fn start_learning(&mut self) {
        self.press_cta();
        self.finish_cta().await;
    }

    /// Feature card or floating button click.
    ///
    /// Returns the selected generation type, or `None` for features that
    /// are not available yet.
    pub fn handle_feature_click(&mut self, action: &str) -> Option<FeatureType> {
        if self.redirected {
            return None;
        }
        let name = feature_display_name(action).to_string();

        let Some(feature) = feature_type_for(action) else {
            self.notifier.info(format!("🚧 {} coming soon!", name));
            return None;
        };

        self.feature = feature;
        self.generator_title = format!("Generate {}", name);
        self.result = None;
        self.source_text.clear();
        self.selected_file = None;

        tracing::debug!(action = %action, feature = %feature, "Feature selected");
        self.notifier.info(format!("Selected: {}", name));
        Some(feature)
    }

    pub fn current_feature(&self) -> FeatureType {
        self.feature
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
    }

    pub fn attach_file(&mut self, file: SelectedFile) {
        tracing::debug!(file = %file.name, size = file.size(), "File attached");
        self.selected_file = Some(file);
    }

    pub fn remove_file(&mut self) {
        self.selected_file = None;
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Handle to the generate button's disabled flag
    pub fn trigger(&self) -> Trigger {
        self.trigger.clone()
    }

    pub fn result(&self) -> Option<&ResultArea> {
        self.result.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Generate button click
    pub async fn generate(&mut self) -> GenerateOutcome {
        if self.redirected {
            return GenerateOutcome::Redirected;
        }
        if self.trigger.is_disabled() {
            return GenerateOutcome::Busy;
        }

        let Some(request) = GenerationRequest::from_inputs(
            &self.source_text,
            self.selected_file.clone(),
            self.feature,
        ) else {
            tracing::warn!("Generate clicked without text or file");
            self.notifier.warning("⚠️ Please paste text OR upload a file");
            return GenerateOutcome::MissingInput;
        };

        let Some(_lease) = self.trigger.try_acquire() else {
            return GenerateOutcome::Busy;
        };

        let token = match session_token(self.store.as_ref()) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token");
                String::new()
            }
        };

        let signal = self.abort.as_ref().map(|controller| controller.signal());
        let notifier = &mut self.notifier;
        let result = self
            .pipeline
            .run(&request, &token, signal.as_ref(), |stage| match stage {
                PipelineStage::Uploading => notifier.info("📤 Uploading file..."),
                PipelineStage::Generating => notifier.info("✨ Generating Content..."),
                _ => {}
            })
            .await;

        if let Some(controller) = &self.abort {
            controller.reset();
        }

        match result {
            Ok(output) => {
                self.result = Some(ResultArea::Content(output.rendered.clone()));
                self.notifier.success("✅ content Ready!");
                GenerateOutcome::Rendered(output)
            }
            Err(e) => {
                let message = e.to_string();
                self.notifier.error(format!("❌ Error: {}", message));
                self.result = Some(ResultArea::Error(format!("Error: {}", message)));
                GenerateOutcome::Failed(message)
            }
        }
    }

    /// Render the current state
    pub fn view(&self) -> DashboardView {
        let activities = self
            .user
            .recent_activity
            .iter()
            .enumerate()
            .map(|(index, activity)| ActivityView {
                icon: activity.icon.clone(),
                title: activity.title.clone(),
                time: activity.time.clone(),
                animation_delay: Duration::from_millis(index as u64 * 100),
            })
            .collect();

        let generator = GeneratorView {
            title: self.generator_title.clone(),
            feature: self.feature,
            source_text: self.source_text.clone(),
            placeholder: if self.selected_file.is_some() {
                PLACEHOLDER_FILE
            } else {
                PLACEHOLDER_EMPTY
            },
            file_name: self.selected_file.as_ref().map(|f| f.name.clone()),
            button_label: self.trigger.label(),
            button_disabled: self.trigger.is_disabled(),
            result: self.result.as_ref().map(|r| r.text().to_string()),
        };

        DashboardView {
            theme: self.theme,
            body_class: self.theme.body_class(),
            theme_icon: self.theme.icon(),
            user_name: self.user.name.clone(),
            progress: ProgressRing::new(self.user.progress),
            streak: self.user.streak,
            total_hours: self.user.total_hours,
            courses_completed: self.user.courses_completed,
            activities,
            avatar_open: self.avatar_open,
            mobile_menu_open: self.mobile_menu_open,
            bottom_nav_active: self.bottom_nav_active,
            cta_label: if self.cta_loading {
                CTA_LOADING_LABEL
            } else {
                CTA_IDLE_LABEL
            },
            generator,
            notice: self.notifier.visible_at(Instant::now()).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{store_session_token, AuthError, AuthProvider, AuthUser};
    use crate::pipeline::PipelineOptions;
    use crate::store::{keys, MemoryStore};
    use crate::testing::{Call, FakeBackend};
    use async_trait::async_trait;
    use serde_json::json;

    fn dashboard(fake: &Arc<FakeBackend>) -> (DashboardController, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store_session_token(store.as_ref(), "tok").unwrap();
        let pipeline =
            GenerationPipeline::new(fake.clone(), fake.clone(), PipelineOptions::default());
        (DashboardController::new(store.clone(), pipeline), store)
    }

    struct NamedProvider;

    #[async_trait]
    impl AuthProvider for NamedProvider {
        async fn get_user(&self, token: &str) -> Result<AuthUser, AuthError> {
            if token != "tok" {
                return Err(AuthError::Rejected {
                    status: 401,
                    message: "bad".to_string(),
                });
            }
            Ok(serde_json::from_value(json!({
                "id": "u1",
                "email": "riley@edubot.ai",
                "user_metadata": {"full_name": "Riley Park"}
            }))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn test_unavailable_feature_never_runs_pipeline() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);
        page.set_source_text("Mitochondria");

        assert_eq!(page.handle_feature_click("avatar"), None);
        assert_eq!(page.handle_feature_click("podcast"), None);

        assert_eq!(
            page.notifier().messages(),
            vec!["🚧 Avatar coming soon!", "🚧 podcast coming soon!"]
        );
        assert_eq!(page.current_feature(), FeatureType::DeepDive);
        assert_eq!(page.view().generator.source_text, "Mitochondria");
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_feature_click_resets_generator() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);
        page.set_source_text("old text");
        page.attach_file(SelectedFile::new("old.pdf", vec![1]));

        assert_eq!(page.handle_feature_click("games"), Some(FeatureType::Quiz));

        let view = page.view();
        assert_eq!(view.generator.title, "Generate Games");
        assert_eq!(view.generator.feature, FeatureType::Quiz);
        assert!(view.generator.source_text.is_empty());
        assert!(view.generator.file_name.is_none());
        assert!(view.generator.result.is_none());
        assert_eq!(page.notifier().current().unwrap().message, "Selected: Games");
    }

    #[tokio::test]
    async fn test_missing_input_makes_no_calls() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);

        assert_eq!(page.generate().await, GenerateOutcome::MissingInput);
        assert!(fake.calls().is_empty());
        assert_eq!(
            page.notifier().current().unwrap().message,
            "⚠️ Please paste text OR upload a file"
        );
        assert!(!page.trigger().is_disabled());
    }

    #[tokio::test]
    async fn test_text_generation_deep_dive() {
        let fake = FakeBackend::new().with_content(json!({"markdown": "## Light reactions"}));
        let (mut page, _) = dashboard(&fake);
        page.set_source_text("Photosynthesis converts light into chemical energy");

        let outcome = page.generate().await;
        assert!(matches!(outcome, GenerateOutcome::Rendered(_)));
        assert_eq!(
            page.result(),
            Some(&ResultArea::Content("## Light reactions".to_string()))
        );
        assert_eq!(
            fake.calls()[1],
            Call::Generate {
                document_id: json!("doc-1"),
                kind: "deep-dive".to_string()
            }
        );
        assert_eq!(
            page.notifier().messages(),
            vec!["✨ Generating Content...", "✅ content Ready!"]
        );
    }

    #[tokio::test]
    async fn test_file_generation_notices_and_output() {
        let fake = FakeBackend::new().with_content(json!({"flashcards": []}));
        let (mut page, _) = dashboard(&fake);
        page.handle_feature_click("flashcards");
        page.attach_file(SelectedFile::new("cells.txt", b"cells".to_vec()));
        assert_eq!(page.view().generator.placeholder, PLACEHOLDER_FILE);

        page.generate().await;

        assert_eq!(
            page.view().generator.result.as_deref(),
            Some("{\n  \"flashcards\": []\n}")
        );
        assert_eq!(
            page.notifier().messages(),
            vec![
                "Selected: Flashcards",
                "📤 Uploading file...",
                "✨ Generating Content...",
                "✅ content Ready!"
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_restores_trigger() {
        let fake = FakeBackend::new().failing_ingest(500);
        let (mut page, _) = dashboard(&fake);
        page.set_source_text("Some notes");

        let outcome = page.generate().await;
        assert_eq!(
            outcome,
            GenerateOutcome::Failed("Text Ingestion failed".to_string())
        );

        let view = page.view();
        assert!(!view.generator.button_disabled);
        assert_eq!(view.generator.button_label, "Generate");
        assert_eq!(
            view.generator.result.as_deref(),
            Some("Error: Text Ingestion failed")
        );
        assert_eq!(
            page.notifier().current().unwrap().message,
            "❌ Error: Text Ingestion failed"
        );
    }

    #[tokio::test]
    async fn test_busy_trigger_ignores_click() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);
        page.set_source_text("Some notes");

        let trigger = page.trigger();
        let lease = trigger.try_acquire().unwrap();
        assert_eq!(page.view().generator.button_label, "Processing...");

        assert_eq!(page.generate().await, GenerateOutcome::Busy);
        assert!(fake.calls().is_empty());

        drop(lease);
        assert!(matches!(page.generate().await, GenerateOutcome::Rendered(_)));
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() {
        let fake = FakeBackend::new();
        let (mut page, store) = dashboard(&fake);
        assert_eq!(page.view().theme_icon, "🌙");

        assert_eq!(page.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("light"));

        let view = page.view();
        assert_eq!(view.theme_icon, "☀️");
        assert_eq!(view.body_class, Some("light-theme"));
    }

    #[tokio::test]
    async fn test_saved_theme_restored_on_load() {
        let fake = FakeBackend::new();
        let store = Arc::new(MemoryStore::new());
        store.set(keys::THEME, "light").unwrap();
        let pipeline =
            GenerationPipeline::new(fake.clone(), fake.clone(), PipelineOptions::default());

        let page = DashboardController::new(store, pipeline);
        assert_eq!(page.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_gate_binds_user_name() {
        let fake = FakeBackend::new();
        let (page, _) = dashboard(&fake);
        let mut page = page.with_gate(AuthGate::new(Arc::new(NamedProvider)));

        let outcome = page.authenticate().await.unwrap();
        assert!(outcome.is_authenticated());
        assert_eq!(page.view().user_name, "Riley Park");
    }

    #[tokio::test]
    async fn test_ungated_page_keeps_mock_user() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);
        assert!(page.authenticate().await.is_none());
        assert_eq!(page.view().user_name, "Alex Chen");
    }

    #[tokio::test]
    async fn test_redirect_stops_page_logic() {
        let fake = FakeBackend::new();
        let pipeline =
            GenerationPipeline::new(fake.clone(), fake.clone(), PipelineOptions::default());
        let mut page = DashboardController::new(Arc::new(MemoryStore::new()), pipeline)
            .with_gate(AuthGate::new(Arc::new(NamedProvider)));

        let outcome = page.authenticate().await.unwrap();
        assert!(matches!(outcome, GateOutcome::Redirect { .. }));
        assert!(page.is_redirected());

        page.set_source_text("Some notes");
        assert_eq!(page.generate().await, GenerateOutcome::Redirected);
        assert_eq!(page.handle_feature_click("quiz"), None);
        assert_eq!(page.toggle_theme().unwrap(), Theme::Dark);
        page.press_cta();
        assert_eq!(page.view().cta_label, "Start Learning");

        assert!(fake.calls().is_empty());
        assert!(page.notifier().current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_applies_to_one_run() {
        let fake = FakeBackend::new().with_delay(Duration::from_secs(60));
        let (page, _) = dashboard(&fake);
        let controller = Arc::new(AbortController::new());
        let mut page = page.with_abort_controller(controller.clone());
        page.set_source_text("Some notes");

        let abort = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            controller.abort();
        };
        let (first, _) = tokio::join!(page.generate(), abort);
        assert_eq!(first, GenerateOutcome::Failed("Request aborted".to_string()));
        assert!(!controller.is_aborted());

        let second = page.generate().await;
        assert!(matches!(second, GenerateOutcome::Rendered(_)));
        assert!(fake
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Generate { .. })));
    }

    #[tokio::test]
    async fn test_abort_before_click_cancels_only_next_run() {
        let fake = FakeBackend::new();
        let (page, _) = dashboard(&fake);
        let controller = Arc::new(AbortController::new());
        let mut page = page.with_abort_controller(controller.clone());
        page.set_source_text("Some notes");

        controller.abort();
        assert_eq!(
            page.generate().await,
            GenerateOutcome::Failed("Request aborted".to_string())
        );
        assert!(fake.calls().is_empty());

        assert!(matches!(page.generate().await, GenerateOutcome::Rendered(_)));
        assert_eq!(fake.calls().len(), 2);
    }

    #[test]
    fn test_progress_ring() {
        let ring = ProgressRing::new(68);
        assert!((ring.circumference - 439.822_971_502_571).abs() < 1e-9);
        assert!((ring.dash_offset - ring.circumference * 0.32).abs() < 1e-9);
        assert_eq!(ring.label, "68%");

        assert_eq!(ProgressRing::new(150).label, "100%");
        assert!(ProgressRing::new(100).dash_offset.abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_menus_and_activity_view() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);

        page.toggle_avatar_menu();
        page.toggle_mobile_menu();
        page.select_bottom_nav(2);
        assert!(page.view().avatar_open);

        page.close_menus();
        let view = page.view();
        assert!(!view.avatar_open);
        assert!(view.mobile_menu_open);
        assert_eq!(view.bottom_nav_active, 2);
        assert_eq!(view.activities.len(), 5);
        assert_eq!(view.activities[3].animation_delay, Duration::from_millis(300));
        assert_eq!(view.activities[0].title, "Completed AI Tutor Session");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cta_loading_cycle() {
        let fake = FakeBackend::new();
        let (mut page, _) = dashboard(&fake);

        page.press_cta();
        assert_eq!(page.view().cta_label, "Loading...");

        page.finish_cta().await;
        assert_eq!(page.view().cta_label, "Start Learning");
        assert_eq!(
            page.notifier().current().unwrap().message,
            "🚀 Let's begin your learning journey!"
        );
    }
}
