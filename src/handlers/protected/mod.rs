// handlers/protected/mod.rs - Session-gated handlers (/api/*)
//
// The session middleware runs for every route and only attaches a Session
// when the bearer token verifies. Each handler here receives it as
// Option<Extension<Session>> and passes it explicitly to its service, which
// owns the 401 decision.

pub mod practice_information;
pub mod templates;
pub mod upload;

pub use practice_information::get as practice_information_get;
pub use practice_information::put as practice_information_put;

pub use templates::list as templates_list;
pub use templates::show as templates_show;

pub use upload::post as upload_post;
