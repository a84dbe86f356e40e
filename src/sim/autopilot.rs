//! Demo-mode player
//!
//! Jumps when the nearest building ahead is a couple of frames from the
//! mammoth's hitbox, and spends the second charge if it is still over a
//! building while falling.

use super::session::GameSession;

/// Frames of lead before the hitboxes would meet
const LEAD_FRAMES: f32 = 2.0;

/// Should the demo player jump this frame?
pub fn wants_jump(session: &GameSession) -> bool {
    if !session.is_running() {
        return false;
    }

    let mammoth = session.mammoth();
    let buffer = session.tuning().hitbox_buffer;
    let speed = session.difficulty().scroll_speed as f32;
    let front = mammoth.pos.x + mammoth.size.x;
    let back = mammoth.pos.x;

    // First building whose shrunk hitbox has not fully passed the mammoth
    let Some(next) = session
        .obstacles()
        .iter()
        .find(|o| o.right() - buffer > back)
    else {
        return false;
    };
    let gap = next.pos.x + buffer - front;

    if mammoth.is_grounded() {
        return gap > 0.0 && gap <= speed * LEAD_FRAMES;
    }

    // Falling onto the building we are crossing: burn the second jump
    let falling = !mammoth.ascending;
    let over_building = gap <= 0.0;
    let close_to_roof = mammoth.pos.y + mammoth.size.y + speed > next.pos.y + buffer;
    falling && over_building && close_to_roof && mammoth.can_jump()
}
