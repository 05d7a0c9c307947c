//! Capability wiring.
//!
//! The core only ever asks the shell for two things: HTTP requests and view
//! renders. We use Crux's built-in capabilities directly because they provide
//! all necessary functionality.

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;
// The Effect derive looks up the app type by the `App` identifier in scope.
use crate::App;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
