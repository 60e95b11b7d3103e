//! Editing session for a single route.
//!
//! The editor keeps a [`RouteDraft`] in memory and only talks to the server
//! when loading and saving. Saving always submits the whole route.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::api::{AuthApi, RouteReader, RouteWriter};
use crate::domain::navigation::AppRoute;
use crate::domain::place::Place;
use crate::domain::route::{PlaceAdditionInfo, RouteDraft, RouteDraftError, RouteSummary};
use crate::domain::types::{PlaceId, Position, RouteId};
use crate::dto::catalog::PlaceCardDto;
use crate::dto::routes::RouteOverviewDto;
use crate::session::{Session, SessionError, SessionExecutor};

use super::{ServiceError, ServiceResult, failed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Ready,
    Saving,
    LoadFailed,
}

impl Display for EditorState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::LoadFailed => "unavailable",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Error,
}

/// Message shown next to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: AlertLevel,
    pub text: String,
}

impl StatusMessage {
    fn info(text: &str) -> Self {
        Self {
            level: AlertLevel::Info,
            text: text.to_string(),
        }
    }

    fn success(text: &str) -> Self {
        Self {
            level: AlertLevel::Success,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Self {
            level: AlertLevel::Error,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("route editor is {0}")]
    NotReady(EditorState),
    #[error("route editor is closed")]
    Closed,
    #[error(transparent)]
    Draft(#[from] RouteDraftError),
}

pub struct RouteEditor {
    route_id: Option<RouteId>,
    draft: RouteDraft,
    state: EditorState,
    status: Option<StatusMessage>,
    cancel: CancellationToken,
}

impl RouteEditor {
    /// Editor for a route that does not exist on the server yet.
    pub fn new_route() -> Self {
        Self {
            route_id: None,
            draft: RouteDraft::new(),
            state: EditorState::Ready,
            status: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Editor for an existing route. Call [`RouteEditor::load`] next.
    pub fn existing(id: RouteId) -> Self {
        Self {
            route_id: Some(id),
            draft: RouteDraft::new(),
            state: EditorState::Loading,
            status: Some(StatusMessage::info("Loading route...")),
            cancel: CancellationToken::new(),
        }
    }

    /// Creates an editor for `id` and loads it.
    pub async fn open<A>(id: RouteId, session: &Session, api: &A) -> ServiceResult<Self>
    where
        A: AuthApi + RouteReader + ?Sized,
    {
        let mut editor = Self::existing(id);
        editor.load(session, api).await?;
        Ok(editor)
    }

    pub fn route_id(&self) -> Option<&RouteId> {
        self.route_id.as_ref()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn draft(&self) -> &RouteDraft {
        &self.draft
    }

    pub fn overview(&self) -> RouteOverviewDto {
        RouteOverviewDto::from(&self.draft)
    }

    /// Catalog cards; places already in the route are not selectable.
    pub fn place_cards(&self, places: &[Place]) -> Vec<PlaceCardDto> {
        places
            .iter()
            .map(|p| PlaceCardDto::new(p, !self.draft.is_excluded(&p.id)))
            .collect()
    }

    /// Abandons in-flight work. Later results are discarded and the draft no
    /// longer accepts changes.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Fetches the route and hydrates the draft.
    pub async fn load<A>(&mut self, session: &Session, api: &A) -> ServiceResult<()>
    where
        A: AuthApi + RouteReader + ?Sized,
    {
        if self.state != EditorState::Loading {
            return Err(EditorError::NotReady(self.state).into());
        }
        let Some(id) = self.route_id.clone() else {
            return Err(EditorError::NotReady(self.state).into());
        };

        let id = &id;
        let result = SessionExecutor::new(session, api)
            .with_cancellation(&self.cancel)
            .run(|token| async move { api.get_route(&token, id).await })
            .await;

        match result {
            _ if self.cancel.is_cancelled() => Err(ServiceError::Cancelled),
            Ok(route) => {
                self.draft = RouteDraft::from_route(route);
                self.state = EditorState::Ready;
                self.status = None;
                Ok(())
            }
            Err(e) => {
                let error = failed(&format!("load route {id}"), e);
                self.state = EditorState::LoadFailed;
                self.status = Some(StatusMessage::error(match error {
                    ServiceError::Unauthenticated => {
                        "Session expired and the route could not be loaded. Please log in again."
                    }
                    ServiceError::NotFound => "Route not found.",
                    _ => "Failed to load the route.",
                }));
                Err(error)
            }
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_ready()?;
        self.draft.rename(name);
        Ok(())
    }

    pub fn add_place(&mut self, info: PlaceAdditionInfo) -> Result<(), EditorError> {
        self.ensure_ready()?;
        self.draft.add_place(info)?;
        self.status = Some(StatusMessage::info(
            "Place added to the route (unsaved). Save to confirm.",
        ));
        Ok(())
    }

    pub fn remove_place(&mut self, id: &PlaceId) -> Result<(), EditorError> {
        self.ensure_ready()?;
        self.draft
            .remove_place(id)
            .ok_or_else(|| RouteDraftError::UnknownPlace(id.clone()))?;
        self.status = Some(StatusMessage::info(
            "Place removed from the route (unsaved). Save to confirm.",
        ));
        Ok(())
    }

    pub fn move_place(&mut self, id: &PlaceId, target: Position) -> Result<(), EditorError> {
        self.ensure_ready()?;
        self.draft.move_place(id, target)?;
        self.status = Some(StatusMessage::info(
            "Place moved (unsaved). Save to confirm.",
        ));
        Ok(())
    }

    /// Submits the whole draft: creates the route when it has no id yet,
    /// replaces it otherwise.
    ///
    /// Returns the location to navigate to, if the save calls for one.
    pub async fn save<A>(&mut self, session: &Session, api: &A) -> ServiceResult<Option<AppRoute>>
    where
        A: AuthApi + RouteWriter + ?Sized,
    {
        self.ensure_ready()?;
        let submission = match self.draft.submission() {
            Ok(submission) => submission,
            Err(e) => {
                self.status = Some(StatusMessage::error("Route name must not be empty."));
                return Err(e.into());
            }
        };

        self.state = EditorState::Saving;
        self.status = Some(StatusMessage::info("Saving route..."));

        let submission = &submission;
        let executor = SessionExecutor::new(session, api).with_cancellation(&self.cancel);
        let result: Result<Option<RouteSummary>, SessionError> = match self.route_id.as_ref() {
            None => executor
                .run(|token| async move { api.create_route(&token, submission).await })
                .await
                .map(Some),
            Some(id) => executor
                .run(|token| async move { api.update_route(&token, id, submission).await })
                .await
                .map(|()| None),
        };
        self.state = EditorState::Ready;

        match result {
            _ if self.cancel.is_cancelled() => Err(ServiceError::Cancelled),
            Ok(created) => {
                self.status = Some(StatusMessage::success("Route saved."));
                Ok(created.map(|summary| {
                    self.route_id = Some(summary.id);
                    AppRoute::Dashboard
                }))
            }
            Err(e) => {
                let error = failed("save route", e);
                self.status = Some(StatusMessage::error(match error {
                    ServiceError::Unauthenticated => {
                        "Session expired and the route was not saved. Please log in again."
                    }
                    _ => "Failed to save the route.",
                }));
                Err(error)
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), EditorError> {
        if self.cancel.is_cancelled() {
            return Err(EditorError::Closed);
        }
        match self.state {
            EditorState::Ready => Ok(()),
            state => Err(EditorError::NotReady(state)),
        }
    }
}
