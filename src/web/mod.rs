pub mod agents;
pub mod body;
pub mod docs;
pub mod reads;
pub mod response;
pub mod routes;

pub use agents::*;
pub use docs::*;
pub use reads::*;
pub use response::*;
pub use routes::*;
