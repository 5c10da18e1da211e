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


//! Tool settings, stored as RON.

use crate::{
    entity::KindFilter,
    log::{Log, MessageKind},
    percentage::PropertyDescriptor,
};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    fs::File,
    path::Path,
};

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Ron(ron::Error),
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        Self::Ron(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        Self::Parse(e)
    }
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Settings i/o error: {e}"),
            SettingsError::Ron(e) => write!(f, "Unable to serialize settings: {e}"),
            SettingsError::Parse(e) => write!(f, "Unable to parse settings: {e}"),
            SettingsError::Invalid(reason) => write!(f, "Invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Range, default and display precision of the percentage control.
#[derive(Deserialize, Serialize, PartialEq, Clone, Debug)]
#[serde(default)]
pub struct PercentageSettings {
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub precision: usize,
}

impl Default for PercentageSettings {
    fn default() -> Self {
        Self {
            default: 100.0,
            min: 0.1,
            max: 1000.0,
            precision: 3,
        }
    }
}

#[derive(Deserialize, Serialize, PartialEq, Clone, Debug, Default)]
#[serde(default)]
pub struct ScaleSettings {
    /// Kinds of selected objects that are tracked and scaled.
    pub allowed_kinds: KindFilter,
    pub percentage: PercentageSettings,
    pub verbosity: MessageKind,
}

impl ScaleSettings {
    pub const MAX_PRECISION: usize = 6;

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let file = File::open(path)?;
        let settings: Self = ron::de::from_reader(file)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        self.validate()?;
        let file = File::create(path)?;
        ron::ser::to_writer_pretty(file, self, PrettyConfig::default())?;
        Ok(())
    }

    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Sets the process-wide log verbosity to [`Self::verbosity`]. The log is shared by every tool
    /// instance, so embedders call this once, after loading settings.
    pub fn apply_log_verbosity(&self) {
        Log::set_verbosity(self.verbosity);
    }

    /// Checks that the percentage range is usable: the lower bound is positive so a zero scale
    /// factor can never be produced, and the default lies inside the range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let PercentageSettings {
            default,
            min,
            max,
            precision,
        } = self.percentage;

        if !(min.is_finite() && max.is_finite() && default.is_finite()) {
            return Err(SettingsError::Invalid(
                "percentage bounds must be finite".to_owned(),
            ));
        }
        if min <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "percentage lower bound must be positive, got {min}"
            )));
        }
        if min > max {
            return Err(SettingsError::Invalid(format!(
                "percentage lower bound {min} exceeds upper bound {max}"
            )));
        }
        if !PropertyDescriptor::from(&self.percentage).contains(default) {
            return Err(SettingsError::Invalid(format!(
                "default percentage {default} is outside of [{min}; {max}]"
            )));
        }
        if precision > Self::MAX_PRECISION {
            return Err(SettingsError::Invalid(format!(
                "precision {precision} is above {}",
                Self::MAX_PRECISION
            )));
        }
        Ok(())
    }
}
