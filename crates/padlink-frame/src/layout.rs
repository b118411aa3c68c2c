//! Wire layout of controller snapshots.
//!
//! Field order and widths here are the wire contract: consumers decode by
//! position, so the arrays below must never be reordered.

/// Number of addressable controller slots.
pub const MAX_PADS: usize = 8;

/// Number of axes in every snapshot layout.
pub const NUM_AXES: usize = 6;

/// Number of button slots in the compact (request/reply) layout.
pub const NUM_BUTTONS: usize = 18;

/// Number of buttons in the full-enumeration layout.
pub const NUM_FULL_BUTTONS: usize = 21;

/// A trigger axis reading strictly above this value reports the paired
/// synthetic trigger button as pressed (~92% of positive full scale).
pub const TRIGGER_THRESHOLD: i16 = 30000;

/// A controller axis, in wire order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WireAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// Axis serialization order for both snapshot layouts.
pub const AXES: [WireAxis; NUM_AXES] = [
    WireAxis::LeftX,
    WireAxis::LeftY,
    WireAxis::RightX,
    WireAxis::RightY,
    WireAxis::TriggerLeft,
    WireAxis::TriggerRight,
];

/// A physical controller button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Misc1,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,
}

/// One button position in the compact layout.
///
/// Trigger slots are synthesized from the trigger axes at sampling time;
/// reserved slots always encode as zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ButtonSlot {
    Pad(PadButton),
    TriggerLeft,
    TriggerRight,
    Reserved,
}

/// Button serialization order for the compact 30-byte layout.
pub const BUTTON_SLOTS: [ButtonSlot; NUM_BUTTONS] = [
    ButtonSlot::Pad(PadButton::A),
    ButtonSlot::Pad(PadButton::B),
    ButtonSlot::Pad(PadButton::X),
    ButtonSlot::Pad(PadButton::Y),
    ButtonSlot::Pad(PadButton::LeftShoulder),
    ButtonSlot::Pad(PadButton::RightShoulder),
    ButtonSlot::TriggerLeft,
    ButtonSlot::TriggerRight,
    ButtonSlot::Pad(PadButton::Back),
    ButtonSlot::Pad(PadButton::Start),
    ButtonSlot::Pad(PadButton::LeftStick),
    ButtonSlot::Pad(PadButton::RightStick),
    ButtonSlot::Pad(PadButton::DPadUp),
    ButtonSlot::Pad(PadButton::DPadDown),
    ButtonSlot::Pad(PadButton::DPadLeft),
    ButtonSlot::Pad(PadButton::DPadRight),
    ButtonSlot::Pad(PadButton::Guide),
    ButtonSlot::Reserved,
];

/// Button serialization order for the full-enumeration 34-byte layout.
pub const FULL_BUTTONS: [PadButton; NUM_FULL_BUTTONS] = [
    PadButton::A,
    PadButton::B,
    PadButton::X,
    PadButton::Y,
    PadButton::Back,
    PadButton::Guide,
    PadButton::Start,
    PadButton::LeftStick,
    PadButton::RightStick,
    PadButton::LeftShoulder,
    PadButton::RightShoulder,
    PadButton::DPadUp,
    PadButton::DPadDown,
    PadButton::DPadLeft,
    PadButton::DPadRight,
    PadButton::Misc1,
    PadButton::Paddle1,
    PadButton::Paddle2,
    PadButton::Paddle3,
    PadButton::Paddle4,
    PadButton::Touchpad,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_slots_sit_in_the_reserved_gap() {
        assert_eq!(BUTTON_SLOTS[6], ButtonSlot::TriggerLeft);
        assert_eq!(BUTTON_SLOTS[7], ButtonSlot::TriggerRight);
        assert_eq!(BUTTON_SLOTS[17], ButtonSlot::Reserved);
    }

    #[test]
    fn layouts_have_documented_arity() {
        assert_eq!(AXES.len(), 6);
        assert_eq!(BUTTON_SLOTS.len(), 18);
        assert_eq!(FULL_BUTTONS.len(), 21);
    }
}
