//! Zodiac data derived from the lunar longitude.

use std::fmt;

/// Sign of the tropical zodiac the moon is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Returns the sign covering an ecliptic longitude (30° per sign,
    /// Aries starting at 0°). Any finite longitude is accepted.
    pub fn from_longitude(degrees: f64) -> Self {
        let idx = (degrees.rem_euclid(360.0) / 30.0).floor() as usize;
        SIGNS[idx.min(11)]
    }

    /// Returns the classical element of the sign.
    pub fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Classical element of a zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Plant part associated with an element in the gardening calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantPart {
    Fruit,
    Root,
    Flower,
    Leaf,
}

impl Element {
    /// Returns the plant part favoured on days of this element.
    pub fn plant_part(self) -> PlantPart {
        match self {
            Self::Fire => PlantPart::Fruit,
            Self::Earth => PlantPart::Root,
            Self::Air => PlantPart::Flower,
            Self::Water => PlantPart::Leaf,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for PlantPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Zodiac data of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacData {
    sign: ZodiacSign,
    element: Element,
}

impl ZodiacData {
    /// Derives zodiac data from the lunar longitude in degrees.
    pub fn from_lunar_longitude(degrees: f64) -> Self {
        let sign = ZodiacSign::from_longitude(degrees);
        Self {
            sign,
            element: sign.element(),
        }
    }

    /// Returns the zodiac sign.
    pub fn sign(&self) -> ZodiacSign {
        self.sign
    }

    /// Returns the element of the sign.
    pub fn element(&self) -> Element {
        self.element
    }
}
