//! Overlay toggle state.
//!
//! Four controls drive six flags. The couplings are carried by the types:
//! - thrust display is exactly one of motor-frame or body-frame ([`ThrustMode`])
//! - net torque is only shown together with per-rotor torque ([`TorqueMode`])

/// Which per-rotor thrust vector is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrustMode {
    #[default]
    Motor,
    Body,
}

impl ThrustMode {
    pub fn next(self) -> Self {
        match self {
            Self::Motor => Self::Body,
            Self::Body => Self::Motor,
        }
    }
}

/// Torque display cycle: off, per-rotor only, per-rotor plus net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorqueMode {
    #[default]
    Off,
    PerRotor,
    PerRotorAndNet,
}

impl TorqueMode {
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::PerRotor,
            Self::PerRotor => Self::PerRotorAndNet,
            Self::PerRotorAndNet => Self::Off,
        }
    }
}

/// An operator control. Each activation advances exactly one piece of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayControl {
    Labels,
    ThrustMode,
    NetThrust,
    Torque,
}

impl DisplayControl {
    pub const ALL: [DisplayControl; 4] = [
        DisplayControl::Labels,
        DisplayControl::ThrustMode,
        DisplayControl::NetThrust,
        DisplayControl::Torque,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    labels: bool,
    thrust_mode: ThrustMode,
    net_thrust: bool,
    torque_mode: TorqueMode,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            labels: true,
            thrust_mode: ThrustMode::Motor,
            net_thrust: false,
            torque_mode: TorqueMode::Off,
        }
    }
}

impl DisplayState {
    pub fn activate(&mut self, control: DisplayControl) {
        match control {
            DisplayControl::Labels => self.labels = !self.labels,
            DisplayControl::ThrustMode => self.thrust_mode = self.thrust_mode.next(),
            DisplayControl::NetThrust => self.net_thrust = !self.net_thrust,
            DisplayControl::Torque => self.torque_mode = self.torque_mode.next(),
        }
    }

    pub fn labels(&self) -> bool {
        self.labels
    }

    pub fn thrust_mode(&self) -> ThrustMode {
        self.thrust_mode
    }

    pub fn thrust_motor(&self) -> bool {
        self.thrust_mode == ThrustMode::Motor
    }

    pub fn thrust_body(&self) -> bool {
        self.thrust_mode == ThrustMode::Body
    }

    pub fn net_thrust(&self) -> bool {
        self.net_thrust
    }

    pub fn torque_mode(&self) -> TorqueMode {
        self.torque_mode
    }

    pub fn torque(&self) -> bool {
        self.torque_mode != TorqueMode::Off
    }

    pub fn net_torque(&self) -> bool {
        self.torque_mode == TorqueMode::PerRotorAndNet
    }

    /// Button caption describing the current state of `control`.
    pub fn caption(&self, control: DisplayControl) -> &'static str {
        match control {
            DisplayControl::Labels if self.labels => "Labels: on",
            DisplayControl::Labels => "Labels: off",
            DisplayControl::ThrustMode => match self.thrust_mode {
                ThrustMode::Motor => "Thrust: motor frame",
                ThrustMode::Body => "Thrust: body frame",
            },
            DisplayControl::NetThrust if self.net_thrust => "Net thrust: on",
            DisplayControl::NetThrust => "Net thrust: off",
            DisplayControl::Torque => match self.torque_mode {
                TorqueMode::Off => "Torque: off",
                TorqueMode::PerRotor => "Torque: per rotor",
                TorqueMode::PerRotorAndNet => "Torque: per rotor + net",
            },
        }
    }
}
