pub mod dual;
pub mod forward;
pub mod node;
pub mod reverse;
pub mod tape;
pub mod tapevar;
