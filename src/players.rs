//! Registered players
//!
//! Scores are filed under a player id handed out at registration. The
//! zodiac sign shown on the profile card is derived from the birth date.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistrationError;

/// Registration id, allocated from 1 upward
pub type PlayerId = u64;

/// Courses offered at registration
pub const MAX_COURSE: u8 = 6;

/// Calendar birth date (day.month.year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl BirthDate {
    /// Validate a day/month/year triple against the calendar
    pub fn new(day: u8, month: u8, year: u16) -> Result<Self, RegistrationError> {
        let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        let days_in_month = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if leap => 29,
            2 => 28,
            _ => 0,
        };
        if day == 0 || day > days_in_month {
            return Err(RegistrationError::InvalidBirthDate { day, month });
        }
        Ok(Self { day, month, year })
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

/// Western zodiac sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

impl ZodiacSign {
    /// Sign for a birth date. Each month switches sign on its cusp day.
    pub fn from_birth_date(date: BirthDate) -> Self {
        use ZodiacSign::*;
        let (cusp, before, after) = match date.month {
            1 => (20, Capricorn, Aquarius),
            2 => (19, Aquarius, Pisces),
            3 => (21, Pisces, Aries),
            4 => (20, Aries, Taurus),
            5 => (21, Taurus, Gemini),
            6 => (21, Gemini, Cancer),
            7 => (23, Cancer, Leo),
            8 => (23, Leo, Virgo),
            9 => (23, Virgo, Libra),
            10 => (23, Libra, Scorpio),
            11 => (22, Scorpio, Sagittarius),
            _ => (22, Sagittarius, Capricorn),
        };
        if date.day < cusp { before } else { after }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
        }
    }
}

/// A registered player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub gender: String,
    /// Study year, 1..=6
    pub course: u8,
    pub birth_date: BirthDate,
    pub zodiac: ZodiacSign,
    /// Unix timestamp (ms) of registration
    pub registered_at_ms: u64,
}

/// All registered players, in registration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
    players: Vec<Player>,
    next_id: PlayerId,
}

impl Default for Players {
    fn default() -> Self {
        Self::new()
    }
}

impl Players {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Register a player and derive their zodiac sign.
    ///
    /// Names are trimmed. Registering an existing name creates a second
    /// profile; [`Players::by_name`] keeps returning the first one.
    pub fn register(
        &mut self,
        full_name: &str,
        gender: &str,
        course: u8,
        birth_date: BirthDate,
        registered_at_ms: u64,
    ) -> Result<&Player, RegistrationError> {
        let full_name = full_name.trim();
        let gender = gender.trim();
        if full_name.is_empty() {
            return Err(RegistrationError::BlankName);
        }
        if gender.is_empty() {
            return Err(RegistrationError::BlankGender);
        }
        if !(1..=MAX_COURSE).contains(&course) {
            return Err(RegistrationError::CourseOutOfRange(course));
        }

        let id = self.next_id;
        self.next_id += 1;
        let zodiac = ZodiacSign::from_birth_date(birth_date);
        log::info!("Registered player #{id} {full_name} ({})", zodiac.as_str());
        self.players.push(Player {
            id,
            full_name: full_name.to_string(),
            gender: gender.to_string(),
            course,
            birth_date,
            zodiac,
            registered_at_ms,
        });
        Ok(&self.players[self.players.len() - 1])
    }

    /// Look up a player by registration id
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        // Ids are allocated in push order
        self.players
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|idx| &self.players[idx])
    }

    /// First player registered under `full_name`
    pub fn by_name(&self, full_name: &str) -> Option<&Player> {
        let full_name = full_name.trim();
        self.players.iter().find(|p| p.full_name == full_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
