//! `/quit`, also submitted by the connection when its socket dies.

use super::{Context, Handler, HandlerResult};
use tracing::{debug, info};

pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let origin = ctx.origin;

        // Explicit /quit racing a read error lands here twice.
        if ctx.state.session(origin).is_none() {
            debug!(session = %origin, "Quit for detached session ignored");
            return Ok(());
        }

        ctx.state.leave_current_room(origin);

        if let Some(entry) = ctx.state.detach(origin) {
            info!(
                session = %origin,
                addr = %entry.handle.addr(),
                nick = %entry.nick,
                "Client has disconnected"
            );
            entry.handle.deliver("sad to see you go :(");
            entry.handle.close();
        }
        Ok(())
    }
}
