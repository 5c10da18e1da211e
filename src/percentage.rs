// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.


//! The percentage control: a bounded numeric property that drives the applier.

use crate::settings::PercentageSettings;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Display hint of a numeric property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertySubtype {
    #[default]
    None,
    Percentage,
    Factor,
}

/// Static description of a numeric property, enough for a host to build a bindable control.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub default: f32,
    /// Inclusive lower bound. Must be positive so the resulting scale factor is never zero.
    pub min: f32,
    /// Inclusive upper bound.
    pub max: f32,
    /// Digits after the decimal point shown by the control.
    pub precision: usize,
    pub subtype: PropertySubtype,
    /// Whether the host must invoke the change callback each time the value changes.
    pub fires_on_change: bool,
}

impl PropertyDescriptor {
    pub const PERCENTAGE: Self = Self {
        name: "Percentage",
        default: 100.0,
        min: 0.1,
        max: 1000.0,
        precision: 3,
        subtype: PropertySubtype::Percentage,
        fires_on_change: true,
    };

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for PropertyDescriptor {
    fn default() -> Self {
        Self::PERCENTAGE
    }
}

impl From<&PercentageSettings> for PropertyDescriptor {
    fn from(settings: &PercentageSettings) -> Self {
        Self {
            default: settings.default,
            min: settings.min,
            max: settings.max,
            precision: settings.precision,
            ..Self::PERCENTAGE
        }
    }
}

/// Current percentage value together with its descriptor. The stored value is always inside the
/// descriptor range.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentageProperty {
    descriptor: PropertyDescriptor,
    value: f32,
}

impl PercentageProperty {
    pub fn new(descriptor: PropertyDescriptor) -> Self {
        let value = descriptor.clamp(descriptor.default);
        Self { descriptor, value }
    }

    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Scale factor that corresponds to the current value.
    #[inline]
    pub fn factor(&self) -> f32 {
        self.value / 100.0
    }

    /// Stores `value` clamped into the property range. NaN is rejected. Returns `true` if the
    /// stored value changed.
    pub fn set(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }

        let value = self.descriptor.clamp(value);
        if value == self.value {
            false
        } else {
            self.value = value;
            true
        }
    }

    /// Restores the default value. Returns `true` if the stored value changed.
    pub fn reset(&mut self) -> bool {
        self.set(self.descriptor.default)
    }
}

impl Default for PercentageProperty {
    fn default() -> Self {
        Self::new(PropertyDescriptor::PERCENTAGE)
    }
}

impl Display for PercentageProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.descriptor.precision, self.value)?;
        if self.descriptor.subtype == PropertySubtype::Percentage {
            f.write_str("%")?;
        }
        Ok(())
    }
}
