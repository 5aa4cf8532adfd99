// Editor sessions: wizard navigation, accent theme, enhancement tickets, and the
// session registry. Handlers here are the only code that awaits remote calls.

pub mod enhance;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod theme;
pub mod wizard;
