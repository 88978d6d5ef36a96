//! The application shell: screens, frame loop, shared state.

use std::collections::HashMap;
use std::time::Instant;

use luxcurve_client::{ApiClient, CurveRequest};
use luxcurve_core::{Curve, CurveKind, EditSession, RequestId};
use luxcurve_widgets::PickerState;

use crate::config::AppConfig;

/// How long a transient failure notice stays up.
pub(crate) const BANNER_SECS: u64 = 5;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    CurveList,
    CurveDetail { id: i64 },
}

/// A transient failure notice.
pub(crate) struct Banner {
    pub message: String,
    pub shown_at: Instant,
}

/// The Luxcurve application.
pub struct App {
    /// None when the configured store address is unusable.
    pub(crate) client: Option<ApiClient>,
    pub(crate) screen: Screen,
    /// Curve list as last fetched, sorted by id.
    pub(crate) curves: Vec<Curve>,
    /// One edit session per opened curve.
    pub(crate) sessions: HashMap<i64, EditSession>,
    pub(crate) pending_list: Option<RequestId>,
    pub(crate) pending_create: Option<RequestId>,
    pub(crate) banner: Option<Banner>,

    // Screen-local UI state.
    pub(crate) create_name: String,
    pub(crate) create_kind: CurveKind,
    pub(crate) rename_text: Option<String>,
    pub(crate) confirm_delete: bool,
    pub(crate) picker: Option<PickerState>,
    pub(crate) menu_anchor: Option<egui::Pos2>,
    pub(crate) offset_drag: Option<i32>,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        log::info!("using curve store at {}:{:?}", config.api.host, config.api.port);
        let (client, banner) = match ApiClient::spawn(&config.api) {
            Ok(client) => (Some(client), None),
            Err(err) => {
                log::error!("could not start api client: {err}");
                let banner = Banner {
                    message: format!("Store unreachable: {err}"),
                    shown_at: Instant::now(),
                };
                (None, Some(banner))
            }
        };

        let mut app = Self {
            client,
            screen: Screen::CurveList,
            curves: Vec::new(),
            sessions: HashMap::new(),
            pending_list: None,
            pending_create: None,
            banner,
            create_name: String::new(),
            create_kind: CurveKind::Brightness,
            rename_text: None,
            confirm_delete: false,
            picker: None,
            menu_anchor: None,
            offset_drag: None,
        };
        app.refresh_list();
        app
    }

    /// Queue a request; None when no client is running.
    pub(crate) fn submit(&mut self, request: CurveRequest) -> Option<RequestId> {
        match self.client.as_mut() {
            Some(client) => Some(client.submit(request)),
            None => {
                self.show_banner("Store is not configured".to_string());
                None
            }
        }
    }

    pub(crate) fn show_banner(&mut self, message: String) {
        log::warn!("{message}");
        self.banner = Some(Banner {
            message,
            shown_at: Instant::now(),
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Reconcile store answers before rendering.
        let events = self
            .client
            .as_mut()
            .map(|c| c.poll_events())
            .unwrap_or_default();
        for event in events {
            self.handle_store_event(event);
        }

        self.render_banner(ctx);
        match self.screen {
            Screen::CurveList => self.render_list(ctx),
            Screen::CurveDetail { id } => self.render_detail(ctx, id),
        }
    }
}
