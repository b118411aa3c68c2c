//! SDL2-backed implementation of the controller backend.

use sdl2::controller::{Axis, Button, GameController};
use sdl2::{GameControllerSubsystem, JoystickSubsystem, Sdl};

use padlink_frame::{PadButton, WireAxis};

use crate::backend::{PadBackend, PadHandle};
use crate::error::{PadError, Result};

/// Controller backend over the SDL2 game-controller API.
pub struct SdlBackend {
    // The context must outlive the subsystems.
    _sdl: Sdl,
    joystick: JoystickSubsystem,
    controller: GameControllerSubsystem,
}

impl SdlBackend {
    /// Initialize SDL and its joystick/game-controller subsystems.
    pub fn init() -> Result<Self> {
        let sdl = sdl2::init().map_err(PadError::Init)?;
        let joystick = sdl.joystick().map_err(PadError::Init)?;
        let controller = sdl.game_controller().map_err(PadError::Init)?;

        tracing::debug!("SDL game-controller subsystem initialized");

        Ok(Self {
            _sdl: sdl,
            joystick,
            controller,
        })
    }
}

impl PadBackend for SdlBackend {
    type Handle = SdlPad;

    fn refresh(&mut self) {
        // SDL_JoystickUpdate also refreshes controller state and hot-plug
        // attachment without an event pump.
        self.joystick.update();
    }

    fn num_devices(&self) -> usize {
        self.joystick
            .num_joysticks()
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    fn is_attached(&self, index: usize) -> bool {
        u32::try_from(index)
            .map(|index| self.controller.is_game_controller(index))
            .unwrap_or(false)
    }

    fn open(&mut self, index: usize) -> Result<SdlPad> {
        let ordinal = u32::try_from(index).map_err(|_| PadError::Open {
            index,
            message: "device index out of range".to_owned(),
        })?;
        let handle = self.controller.open(ordinal).map_err(|err| PadError::Open {
            index,
            message: err.to_string(),
        })?;

        Ok(SdlPad { handle })
    }
}

/// An open SDL game-controller handle; closed on drop.
pub struct SdlPad {
    handle: GameController,
}

impl PadHandle for SdlPad {
    fn axis(&self, axis: WireAxis) -> i16 {
        self.handle.axis(map_axis(axis))
    }

    fn button(&self, button: PadButton) -> bool {
        self.handle.button(map_button(button))
    }

    fn name(&self) -> String {
        self.handle.name()
    }
}

fn map_axis(axis: WireAxis) -> Axis {
    match axis {
        WireAxis::LeftX => Axis::LeftX,
        WireAxis::LeftY => Axis::LeftY,
        WireAxis::RightX => Axis::RightX,
        WireAxis::RightY => Axis::RightY,
        WireAxis::TriggerLeft => Axis::TriggerLeft,
        WireAxis::TriggerRight => Axis::TriggerRight,
    }
}

fn map_button(button: PadButton) -> Button {
    match button {
        PadButton::A => Button::A,
        PadButton::B => Button::B,
        PadButton::X => Button::X,
        PadButton::Y => Button::Y,
        PadButton::Back => Button::Back,
        PadButton::Guide => Button::Guide,
        PadButton::Start => Button::Start,
        PadButton::LeftStick => Button::LeftStick,
        PadButton::RightStick => Button::RightStick,
        PadButton::LeftShoulder => Button::LeftShoulder,
        PadButton::RightShoulder => Button::RightShoulder,
        PadButton::DPadUp => Button::DPadUp,
        PadButton::DPadDown => Button::DPadDown,
        PadButton::DPadLeft => Button::DPadLeft,
        PadButton::DPadRight => Button::DPadRight,
        PadButton::Misc1 => Button::Misc1,
        PadButton::Paddle1 => Button::Paddle1,
        PadButton::Paddle2 => Button::Paddle2,
        PadButton::Paddle3 => Button::Paddle3,
        PadButton::Paddle4 => Button::Paddle4,
        PadButton::Touchpad => Button::Touchpad,
    }
}
