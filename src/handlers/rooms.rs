//! `/rooms`

use super::{Context, Handler, HandlerResult};

pub struct RoomsHandler;

impl Handler for RoomsHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let listing = ctx.state.rooms.names().join(", ");
        ctx.session()?
            .handle
            .deliver(format!("available rooms are: {listing}"));
        Ok(())
    }
}
