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


//! Process-wide logger. Writes into the console by default; a log file and channel listeners can be
//! attached at any time.

use fxhash::FxHashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    collections::hash_map::Entry,
    fs::File,
    io::{self, Write},
    path::Path,
    sync::{mpsc::Sender, LazyLock},
    time::{Duration, Instant},
};

/// A message sent by the logger to every listener.
#[derive(Clone, Debug)]
pub struct LogMessage {
    pub kind: MessageKind,
    /// Message text without the kind prefix.
    pub content: String,
    /// Time since the logger was initialized.
    pub time: Duration,
}

static LOG: LazyLock<Mutex<Log>> = LazyLock::new(|| {
    Mutex::new(Log {
        file: None,
        verbosity: MessageKind::Information,
        listeners: Default::default(),
        time_origin: Instant::now(),
        one_shot_sources: Default::default(),
    })
});

#[derive(
    Debug, Default, Copy, Clone, PartialOrd, PartialEq, Eq, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum MessageKind {
    #[default]
    Information = 0,
    Warning = 1,
    Error = 2,
}

impl MessageKind {
    fn as_str(self) -> &'static str {
        match self {
            MessageKind::Information => "[INFO]: ",
            MessageKind::Warning => "[WARNING]: ",
            MessageKind::Error => "[ERROR]: ",
        }
    }
}

/// See module docs.
pub struct Log {
    file: Option<File>,
    verbosity: MessageKind,
    listeners: Vec<Sender<LogMessage>>,
    time_origin: Instant,
    one_shot_sources: FxHashMap<u64, String>,
}

impl Log {
    /// Creates a log file at the specified path; every following message is duplicated into it.
    pub fn set_file_name<P: AsRef<Path>>(path: P) {
        LOG.lock().file = File::create(path).ok();
    }

    fn write_internal(&mut self, id: Option<u64>, kind: MessageKind, message: &str) -> bool {
        if kind < self.verbosity {
            return false;
        }

        if let Some(id) = id {
            match self.one_shot_sources.entry(id) {
                Entry::Occupied(mut previous) => {
                    if previous.get() == message {
                        return false;
                    }
                    previous.insert(message.to_owned());
                }
                Entry::Vacant(entry) => {
                    entry.insert(message.to_owned());
                }
            }
        }

        let time = self.time_origin.elapsed();
        self.listeners.retain(|listener| {
            listener
                .send(LogMessage {
                    kind,
                    content: message.to_owned(),
                    time,
                })
                .is_ok()
        });

        let line = format!("{}{message}\n", kind.as_str());
        let _ = io::stdout().write_all(line.as_bytes());
        if let Some(file) = self.file.as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }

        true
    }

    /// Writes a line to the console and the log file (if set).
    pub fn writeln<S: AsRef<str>>(kind: MessageKind, msg: S) {
        LOG.lock().write_internal(None, kind, msg.as_ref());
    }

    /// Same as [`Self::writeln`], but writes the message only once per `id` as long as the message
    /// stays the same. Prevents repeated warnings from flooding the log.
    pub fn writeln_once<S: AsRef<str>>(id: u64, kind: MessageKind, msg: S) -> bool {
        LOG.lock().write_internal(Some(id), kind, msg.as_ref())
    }

    pub fn info<S: AsRef<str>>(msg: S) {
        Self::writeln(MessageKind::Information, msg)
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        Self::writeln(MessageKind::Warning, msg)
    }

    pub fn err<S: AsRef<str>>(msg: S) {
        Self::writeln(MessageKind::Error, msg)
    }

    pub fn warn_once<S: AsRef<str>>(id: u64, msg: S) -> bool {
        Self::writeln_once(id, MessageKind::Warning, msg)
    }

    pub fn set_verbosity(kind: MessageKind) {
        LOG.lock().verbosity = kind;
    }

    pub fn verbosity() -> MessageKind {
        LOG.lock().verbosity
    }

    /// Adds a listener that receives a copy of every message that passes the verbosity filter.
    /// Disconnected listeners are removed automatically.
    pub fn add_listener(listener: Sender<LogMessage>) {
        LOG.lock().listeners.push(listener)
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::Log::info(format!($($arg)*))
    };
}
