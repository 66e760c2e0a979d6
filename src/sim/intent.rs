use bitflags::bitflags;

bitflags! {
    /// Movement keys held this tick. Opposing pairs cancel out.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MoveIntent: u8 {
        // Along the facing.
        const FORWARD      = 0b0001;
        const BACKWARD     = 0b0010;
        // Perpendicular to the facing.
        const STRAFE_LEFT  = 0b0100;
        const STRAFE_RIGHT = 0b1000;
    }
}
