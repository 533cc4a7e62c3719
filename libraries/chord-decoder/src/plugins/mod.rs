//! Built-in decoder plugins

use crate::plugin::DecoderPlugin;

pub mod meta_source;

/// Every plugin compiled into this crate, in registration order
pub static BUILTIN_PLUGINS: &[&DecoderPlugin] = &[&meta_source::META_SOURCE_PLUGIN];
