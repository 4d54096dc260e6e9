// Copyright 2025 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Process-wide tracing for the emulator.
//!
//! Two mutually exclusive outputs, both on stderr so that stdout only ever
//! carries the signing result:
//!
//! - a compact human log, filtered by `SIGIL_LOG`;
//! - JSON traces of every span and event, filtered by `SIGIL_TRACE`.

use std::{
    env::VarError,
    error::Error,
    io::{self, IsTerminal},
    str::FromStr,
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::format::{FmtSpan, JsonFields},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_VAR: &str = "SIGIL_LOG";

pub const DEFAULT_LOG_FILTER: &str = "error,sigil=info,sigil_signer=info";

pub const TRACE_VAR: &str = "SIGIL_TRACE";

pub const DEFAULT_TRACE_FILTER: &str = "sigil_signer=trace";

/// Installs the global subscriber. Filter fallbacks are reported once the
/// subscriber is up, so they end up in the selected output.
pub fn setup_observability(with_json_traces: bool, color: bool) {
    let mut fallbacks = Vec::new();

    let traces = with_json_traces.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .event_format(tracing_subscriber::fmt::format().json().with_span_list(false))
            .fmt_fields(JsonFields::new())
            .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
            .with_filter(env_filter(TRACE_VAR, DEFAULT_TRACE_FILTER, &mut fallbacks))
    });

    let log = (!with_json_traces).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .event_format(tracing_subscriber::fmt::format().with_ansi(color).compact())
            .with_filter(env_filter(LOG_VAR, DEFAULT_LOG_FILTER, &mut fallbacks))
    });

    tracing_subscriber::registry().with(traces).with(log).init();

    fallbacks.into_iter().for_each(Fallback::report);
}

// -----------------------------------------------------------------------------
// ENV FILTER
// -----------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
struct Fallback {
    var: &'static str,
    default: &'static str,
    /// `None` when the variable is simply unset.
    reason: Option<String>,
}

impl Fallback {
    fn report(self) {
        let Fallback { var, default, reason } = self;
        match reason {
            None => info!(var, fallback = default, "unspecified ENV variable"),
            Some(reason) => warn!(var, fallback = default, %reason, "invalid ENV variable"),
        }
    }
}

fn env_filter(
    var: &'static str,
    default: &'static str,
    fallbacks: &mut Vec<Fallback>,
) -> EnvFilter {
    match EnvFilter::try_from_env(var) {
        Ok(filter) => filter,
        Err(e) => {
            let unset = matches!(
                e.source().and_then(|source| source.downcast_ref::<VarError>()),
                Some(VarError::NotPresent)
            );
            fallbacks.push(Fallback {
                var,
                default,
                reason: (!unset).then(|| e.to_string()),
            });
            EnvFilter::new(default)
        }
    }
}

// -----------------------------------------------------------------------------
// COLOR
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Never,
    Always,
    Auto,
}

impl FromStr for Color {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Color::Never),
            "always" => Ok(Color::Always),
            "auto" => Ok(Color::Auto),
            _ => Err("valid color settings are 'never', 'always' or 'auto'"),
        }
    }
}

impl Color {
    /// Without an explicit setting, colors follow `NO_COLOR` and whether
    /// stderr is a terminal.
    pub fn is_enabled(this: Option<Self>) -> bool {
        Self::resolve(this, std::env::var("NO_COLOR").ok(), io::stderr().is_terminal())
    }

    fn resolve(this: Option<Self>, no_color: Option<String>, is_terminal: bool) -> bool {
        match this {
            Some(Color::Never) => false,
            Some(Color::Always) => true,
            Some(Color::Auto) => is_terminal,
            None => no_color.is_none_or(|s| s.is_empty()) && is_terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(Color::Never), None, true => false; "never")]
    #[test_case(Some(Color::Always), Some("1"), false => true; "always beats NO_COLOR")]
    #[test_case(Some(Color::Auto), None, false => false; "auto off a terminal")]
    #[test_case(None, Some("1"), true => false; "NO_COLOR")]
    #[test_case(None, Some(""), true => true; "empty NO_COLOR")]
    #[test_case(None, None, true => true; "terminal")]
    fn color(setting: Option<Color>, no_color: Option<&str>, is_terminal: bool) -> bool {
        Color::resolve(setting, no_color.map(str::to_string), is_terminal)
    }

    #[test]
    fn color_from_str() {
        pretty_assertions::assert_eq!("auto".parse(), Ok(Color::Auto));
        assert!("sometimes".parse::<Color>().is_err());
    }

    #[test]
    fn unset_variable_falls_back_quietly() {
        let mut fallbacks = Vec::new();
        env_filter("SIGIL_UNSET_FILTER_FOR_TESTS", DEFAULT_TRACE_FILTER, &mut fallbacks);
        pretty_assertions::assert_eq!(
            fallbacks,
            vec![Fallback {
                var: "SIGIL_UNSET_FILTER_FOR_TESTS",
                default: DEFAULT_TRACE_FILTER,
                reason: None,
            }]
        );
    }
}
