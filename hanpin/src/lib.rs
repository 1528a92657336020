//! hanpin crate root
//!
//! Converts Han text into pinyin. The crate provides the toned-vowel symbol
//! table, the style formatter, character and phrase resolvers, segmentation
//! adapters and the `Converter` pipeline built on the dictionary types from
//! `hanpin-core`.
//!
//! Public API exported here:
//! - `Converter` and `join_slots` from `converter`
//! - `Style` and the `STYLE_*` codes from `style`
//! - `Options`, `PinyinConfig`, `SegmenterKind` from `config`
//! - `Segmenter`, `Span`, `CharSegmenter`, `DictSegmenter` from `segmenter`
//! - `load_dictionaries` from `source`
//!
//! # Example
//!
//! ```rust
//! use hanpin::{Converter, Dictionaries, Options, Style};
//!
//! let converter = Converter::with_dict_segmenter(Dictionaries::load_demo());
//! let slots = converter.convert("我爱重庆", &Options::with_style(Style::Tone2));
//! assert_eq!(slots, vec![vec!["wo3"], vec!["ai4"], vec!["chong2"], vec!["qing4"]]);
//! ```

pub mod config;
pub mod converter;
pub mod resolver;
pub mod segmenter;
pub mod source;
pub mod style;
pub mod symbols;

pub use hanpin_core::{CharDict, Config, Dictionaries, Error, PhraseDict, Result};

pub use config::{Options, PinyinConfig, SegmenterKind};
pub use converter::{join_slots, Converter, Slot};
pub use segmenter::{CharSegmenter, DictSegmenter, Segmenter, Span};
#[cfg(feature = "jieba")]
pub use segmenter::JiebaSegmenter;
pub use source::load_dictionaries;
pub use style::{
    Style, STYLE_FIRST_LETTER, STYLE_INITIALS, STYLE_NORMAL, STYLE_TONE, STYLE_TONE2,
};

/// Build a boxed segmenter of the requested kind.
///
/// `SegmenterKind::Jieba` without the `jieba` feature falls back to the
/// dictionary segmenter with a warning.
pub fn build_segmenter(kind: SegmenterKind, dicts: &Dictionaries) -> Box<dyn Segmenter + Send + Sync> {
    match kind {
        SegmenterKind::Dict => Box::new(DictSegmenter::from_phrase_dict(&dicts.phrases)),
        SegmenterKind::Char => Box::new(CharSegmenter),
        #[cfg(feature = "jieba")]
        SegmenterKind::Jieba => Box::new(JiebaSegmenter::new()),
        #[cfg(not(feature = "jieba"))]
        SegmenterKind::Jieba => {
            tracing::warn!("built without the `jieba` feature, using the dictionary segmenter");
            Box::new(DictSegmenter::from_phrase_dict(&dicts.phrases))
        }
    }
}

/// Load the dictionaries named by `config` and build a converter with the
/// configured segmenter and input normalization.
pub fn converter_from_config(
    config: &PinyinConfig,
) -> Result<Converter<Box<dyn Segmenter + Send + Sync>>> {
    let dicts = load_dictionaries(config.base())?;
    let segmenter = build_segmenter(config.segmenter, &dicts);
    Ok(Converter::new(dicts, segmenter).normalize_input(config.base().normalize_input))
}
