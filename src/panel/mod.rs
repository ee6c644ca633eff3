mod context;
mod events;
mod page;

pub use context::EntityContext;
pub use events::{BINDINGS, Binding, EventKind, PageEvent};
pub use page::{ElementId, Page};

use dirdesk_schema::{ActionResponse, EntityRecord};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::api::EntityApi;
use crate::error::PanelError;
use crate::form::{FormField, record_from_fields};
use crate::ui::{AlertStack, Severity, set_loading};
use crate::view::{self, Action};

/// CRUD controller for one entity kind.
///
/// Owns the page it renders into and the last full list it loaded; the list
/// is only consulted to decide whether a delete or update should refresh it.
pub struct EntityPanel<A, P> {
    ctx: EntityContext,
    api: A,
    page: P,
    alerts: AlertStack,
    loaded: Vec<EntityRecord>,
}

impl<A, P> EntityPanel<A, P>
where
    A: EntityApi,
    P: Page,
{
    pub fn new(ctx: EntityContext, api: A, page: P, alerts: AlertStack) -> Self {
        Self {
            ctx,
            api,
            page,
            alerts,
            loaded: Vec::new(),
        }
    }

    pub fn context(&self) -> &EntityContext {
        &self.ctx
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn alerts(&self) -> &AlertStack {
        &self.alerts
    }

    /// Entities from the last successful "list all".
    pub fn loaded_entities(&self) -> &[EntityRecord] {
        &self.loaded
    }

    /// Listeners the host must install before dispatching events.
    pub fn bindings(&self) -> &'static [Binding] {
        &BINDINGS
    }

    pub async fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::Loaded => self.on_load().await,
            PageEvent::SubmitAddForm => self.add().await,
            PageEvent::SearchKeyPress(key) if key == "Enter" => self.search().await,
            PageEvent::SearchKeyPress(_) => {}
            PageEvent::SearchClicked => self.search().await,
            PageEvent::ClearSearch => self.clear_search(),
            PageEvent::LoadAll => self.list_all().await,
            PageEvent::Click(Action::Delete(id)) => self.delete(&id).await,
            PageEvent::Click(Action::CloseAlert(id)) => {
                self.alerts.close(id);
            }
        }
    }

    /// Page-load hook: starts timers for alerts already on the page, then
    /// fetches the count.
    pub async fn on_load(&mut self) {
        self.alerts.arm_existing();
        self.load_count().await;
    }

    /// Refreshes the count display. Failures are logged only.
    pub async fn load_count(&mut self) {
        match self.api.count().await {
            Ok(resp) => self.page.set_count(resp.value()),
            Err(err) => {
                error!(entity_type = %self.ctx.token(), error = %err, "Error loading count");
            }
        }
    }

    pub async fn search(&mut self) {
        let term = self.page.search_term().trim().to_string();
        if term.is_empty() {
            self.alerts
                .show("Please enter a search term", Severity::Warning);
            return;
        }

        match self.api.search(&term).await {
            Ok(entities) => {
                info!(entity_type = %self.ctx.token(), hits = entities.len(), "Search finished");
                let fragment = view::search_results(&self.ctx, &entities);
                self.page.render_search_results(Some(fragment));
            }
            Err(err) => {
                error!(entity_type = %self.ctx.token(), error = %err, "Error searching");
                self.alerts.show(
                    format!("Error searching {}", self.ctx.token()),
                    Severity::Error,
                );
            }
        }
    }

    pub async fn add(&mut self) {
        let record = record_from_fields(&self.page.form_fields());

        if let Some(button) = self.page.submit_button() {
            set_loading(button, true);
        }
        let outcome = self.api.add(&record).await;
        if let Some(button) = self.page.submit_button() {
            set_loading(button, false);
        }

        let generic = format!("Error adding {}", self.ctx.name_lower());
        if self.report("adding", outcome, &generic) {
            self.alerts.show(
                format!("{} added successfully!", self.ctx.name()),
                Severity::Success,
            );
            self.page.reset_form();
            self.load_count().await;
        }
    }

    /// Loads every entity, remembers the list and renders it with creators.
    pub async fn list_all(&mut self) {
        match self.api.list().await {
            Ok(entities) => {
                self.loaded = entities;
                let fragment = view::entities_list(&self.ctx, &self.loaded);
                self.page.render_entities_list(fragment);
            }
            Err(err) => {
                error!(entity_type = %self.ctx.token(), error = %err, "Error loading entities");
                self.alerts.show(
                    format!("Error loading {}", self.ctx.token()),
                    Severity::Error,
                );
            }
        }
    }

    /// Asks for confirmation, then deletes. Declining sends nothing.
    pub async fn delete(&mut self, id: &str) {
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            self.ctx.name_lower()
        );
        if !self.page.confirm(&prompt) {
            return;
        }

        let outcome = self.api.delete(id).await;
        let generic = format!("Error deleting {}", self.ctx.name_lower());
        if self.report("deleting", outcome, &generic) {
            self.alerts.show(
                format!("{} deleted successfully!", self.ctx.name()),
                Severity::Success,
            );
            self.load_count().await;
            self.refresh_loaded().await;
        }
    }

    /// Sends changed fields for one entity; same coercion as add.
    pub async fn update(&mut self, id: &str, fields: &[FormField]) {
        let record = record_from_fields(fields);
        let outcome = self.api.update(id, &record).await;
        let generic = format!("Error updating {}", self.ctx.name_lower());
        if self.report("updating", outcome, &generic) {
            self.alerts.show(
                format!("{} updated successfully!", self.ctx.name()),
                Severity::Success,
            );
            self.refresh_loaded().await;
        }
    }

    /// Saves the server's export under `dir`. Returns the written path.
    pub async fn download(&mut self, dir: &Path) -> Option<PathBuf> {
        match self.save_download(dir).await {
            Ok(path) => {
                info!(entity_type = %self.ctx.token(), path = %path.display(), "Export saved");
                self.alerts.show(
                    format!("{} list downloaded", self.ctx.name()),
                    Severity::Success,
                );
                Some(path)
            }
            Err(err) => {
                error!(entity_type = %self.ctx.token(), error = %err, "Error downloading");
                self.alerts.show(
                    format!("Error downloading {}", self.ctx.token()),
                    Severity::Error,
                );
                None
            }
        }
    }

    /// Empties the search input and results. No request.
    pub fn clear_search(&mut self) {
        self.page.set_search_term("");
        self.page.render_search_results(None);
    }

    async fn refresh_loaded(&mut self) {
        if !self.loaded.is_empty() {
            self.list_all().await;
        }
    }

    async fn save_download(&self, dir: &Path) -> Result<PathBuf, PanelError> {
        let export = self.api.download().await?;
        let filename = Path::new(&export.filename)
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(format!("{}_list.xlsx", self.ctx.token())));
        let path = dir.join(filename);
        tokio::fs::write(&path, &export.bytes).await?;
        Ok(path)
    }

    /// Surfaces a failed action as an alert. Returns whether it succeeded.
    fn report(
        &self,
        verb: &str,
        outcome: Result<ActionResponse, PanelError>,
        generic: &str,
    ) -> bool {
        match outcome {
            Ok(resp) if resp.success => true,
            Ok(resp) => {
                self.alerts
                    .show(resp.message().unwrap_or(generic), Severity::Error);
                false
            }
            Err(err) => {
                error!(entity_type = %self.ctx.token(), error = %err, "Error {verb} entity");
                self.alerts.show(generic, Severity::Error);
                false
            }
        }
    }
}
