/// Status indicator: one RGB LED on three plain GPIOs.
use embedded_hal::digital::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Off,
    Success,
    Failure,
    /// Short pulse after a rejected candidate.
    AttemptFailed,
}

impl Color {
    /// (R, G, B) levels, 1 = lit.
    pub fn rgb(self) -> (bool, bool, bool) {
        match self {
            Color::Off => (false, false, false),
            Color::Success => (false, true, false),
            Color::Failure => (true, false, false),
            Color::AttemptFailed => (false, false, true),
        }
    }
}

pub trait Indicator {
    /// Infallible by contract; implementations swallow pin errors.
    fn set(&mut self, color: Color);

    fn color(&self) -> Color;
}

impl<T: Indicator + ?Sized> Indicator for &mut T {
    fn set(&mut self, color: Color) {
        (**self).set(color)
    }

    fn color(&self) -> Color {
        (**self).color()
    }
}

pub struct RgbIndicator<R, G, B> {
    red: R,
    green: G,
    blue: B,
    active_low: bool,
    color: Color,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbIndicator<R, G, B> {
    /// Active-high LED, driven off immediately.
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self::with_polarity(red, green, blue, false)
    }

    pub fn with_polarity(red: R, green: G, blue: B, active_low: bool) -> Self {
        let mut led = RgbIndicator {
            red,
            green,
            blue,
            active_low,
            color: Color::Off,
        };
        led.set(Color::Off);
        led
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    fn drive<P: OutputPin>(pin: &mut P, lit: bool, active_low: bool) {
        if lit != active_low {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> Indicator for RgbIndicator<R, G, B> {
    fn set(&mut self, color: Color) {
        let (r, g, b) = color.rgb();
        Self::drive(&mut self.red, r, self.active_low);
        Self::drive(&mut self.green, g, self.active_low);
        Self::drive(&mut self.blue, b, self.active_low);
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }
}
