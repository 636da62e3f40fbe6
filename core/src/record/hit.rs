//! record/hit.rs
//! The decoded hit and its derived views.
//!
//! Every derived field is a pure function of the two header words, so a `Hit`
//! never changes after construction and can be freely cloned across threads.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use crate::constants::{word0, word1};
use crate::record::types::{HitFlags, RawRecord};

/// Four compressed charge samples carried in `header_word_1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChargeStamp {
    /// Sample index of the peak (4 bits, never shifted).
    pub position: u32,
    pub pre: u32,
    pub max: u32,
    pub post: u32,
}

impl ChargeStamp {
    /// Unpack a charge stamp from `header_word_1`.
    pub fn from_word(w1: u32) -> Self {
        let shift = charge_shift(w1);
        Self {
            position: (w1 >> word1::POSITION_SHIFT) & word1::POSITION_MASK,
            pre: ((w1 >> word1::PRE_SHIFT) & word1::SAMPLE_MASK) << shift,
            max: ((w1 >> word1::MAX_SHIFT) & word1::SAMPLE_MASK) << shift,
            post: (w1 & word1::SAMPLE_MASK) << shift,
        }
    }
}

#[inline]
fn charge_shift(w1: u32) -> u32 {
    if w1 & word1::SHIFT_FLAG != 0 { 1 } else { 0 }
}

/// One detector pulse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    sensor_id: String,
    hardware_id: u64,
    timestamp: u64,
    words: [u32; 2],
    payload: Bytes,
}

impl Hit {
    pub fn new(sensor_id: impl Into<String>, timestamp: u64, header_word_0: u32, header_word_1: u32) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            hardware_id: 0,
            timestamp,
            words: [header_word_0, header_word_1],
            payload: Bytes::new(),
        }
    }

    /// Build a hit from a decoded record once its sensor has been resolved.
    pub fn from_record(sensor_id: impl Into<String>, record: RawRecord) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            hardware_id: record.header.hardware_id,
            timestamp: record.header.timestamp,
            words: [record.header.word0, record.header.word1],
            payload: record.trailer,
        }
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn hardware_id(&self) -> u64 {
        self.hardware_id
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn header_word_0(&self) -> u32 {
        self.words[0]
    }

    pub fn header_word_1(&self) -> u32 {
        self.words[1]
    }

    /// Opaque trailer bytes (waveform data), untouched.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn flags(&self) -> HitFlags {
        HitFlags::from_bits_truncate(self.words[0])
    }

    // ---- word 0 ----

    /// Local-coincidence code, bits 16-17.
    pub fn lc(&self) -> u8 {
        ((self.words[0] >> word0::LC_SHIFT) & word0::LC_MASK) as u8
    }

    pub fn min_bias(&self) -> bool {
        self.flags().contains(HitFlags::MIN_BIAS)
    }

    pub fn has_fadc(&self) -> bool {
        self.flags().contains(HitFlags::FADC)
    }

    pub fn has_atwd(&self) -> bool {
        self.flags().contains(HitFlags::ATWD)
    }

    /// ATWD chip letter from bit 11, regardless of waveform presence.
    pub fn atwd_chip(&self) -> char {
        if (self.words[0] >> word0::ATWD_SIDE_SHIFT) & 1 == 0 { 'A' } else { 'B' }
    }

    /// ATWD chip letter, only when a waveform is present.
    pub fn atwd_side(&self) -> Option<char> {
        self.has_atwd().then(|| self.atwd_chip())
    }

    /// Two-character digitizer summary: `F`/`-` then `A`/`B`/`-`.
    pub fn dig_info(&self) -> String {
        let mut s = String::with_capacity(2);
        s.push(if self.has_fadc() { 'F' } else { '-' });
        s.push(self.atwd_side().unwrap_or('-'));
        s
    }

    /// Trigger mask, bits 18-29.
    pub fn trigger_mask(&self) -> u16 {
        ((self.words[0] >> word0::TRIGGER_SHIFT) & word0::TRIGGER_MASK) as u16
    }

    /// Record size as declared by the hardware, bits 0-10.
    pub fn hit_size(&self) -> u16 {
        (self.words[0] & word0::HIT_SIZE_MASK) as u16
    }

    // ---- word 1 ----

    pub fn charge_shift(&self) -> u32 {
        charge_shift(self.words[1])
    }

    pub fn charge_stamp(&self) -> ChargeStamp {
        ChargeStamp::from_word(self.words[1])
    }

    pub fn charge_pos(&self) -> u32 {
        self.charge_stamp().position
    }

    pub fn charge_pre(&self) -> u32 {
        self.charge_stamp().pre
    }

    pub fn charge_max(&self) -> u32 {
        self.charge_stamp().max
    }

    pub fn charge_post(&self) -> u32 {
        self.charge_stamp().post
    }

    // ---- sensor id ----

    /// Hub number when the sensor id has the `HH-DD` shape.
    pub fn hub_number(&self) -> Option<u8> {
        split_location(&self.sensor_id).map(|(hub, _)| hub)
    }

    /// DOM (channel) number when the sensor id has the `HH-DD` shape.
    pub fn dom_number(&self) -> Option<u8> {
        split_location(&self.sensor_id).map(|(_, dom)| dom)
    }

    /// Flat, serializable view of every field.
    pub fn to_row(&self) -> HitRow {
        let cs = self.charge_stamp();
        HitRow {
            sensor_id: self.sensor_id.clone(),
            hub_num: self.hub_number(),
            dom_num: self.dom_number(),
            timestamp: self.timestamp,
            lc: self.lc(),
            min_bias: self.min_bias(),
            trigger_mask: self.trigger_mask(),
            dig_info: self.dig_info(),
            charge_pos: cs.position,
            charge_pre: cs.pre,
            charge_max: cs.max,
            charge_post: cs.post,
            hit_size: self.hit_size(),
        }
    }
}

/// Parse `HH-DD` into its two numbers.
pub(crate) fn split_location(loc: &str) -> Option<(u8, u8)> {
    let (hub, dom) = loc.split_once('-')?;
    Some((hub.parse().ok()?, dom.parse().ok()?))
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cs = self.charge_stamp();
        write!(
            f,
            "HIT: {} {} {:x} {:x} {:03x} {} {:2} {} {} {} {}",
            self.sensor_id,
            self.timestamp,
            self.lc(),
            self.min_bias() as u8,
            self.trigger_mask(),
            self.dig_info(),
            cs.position,
            cs.pre,
            cs.max,
            cs.post,
            self.hit_size(),
        )
    }
}

/// One exported row per hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitRow {
    pub sensor_id: String,
    pub hub_num: Option<u8>,
    pub dom_num: Option<u8>,
    pub timestamp: u64,
    pub lc: u8,
    pub min_bias: bool,
    pub trigger_mask: u16,
    pub dig_info: String,
    pub charge_pos: u32,
    pub charge_pre: u32,
    pub charge_max: u32,
    pub charge_post: u32,
    pub hit_size: u16,
}
