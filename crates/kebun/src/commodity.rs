// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight tracked plantation crops, in source column order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Commodity {
    #[default]
    #[serde(rename = "Kelapa_Sawit")]
    OilPalm,
    #[serde(rename = "Kelapa")]
    Coconut,
    #[serde(rename = "Karet")]
    Rubber,
    #[serde(rename = "Kopi")]
    Coffee,
    #[serde(rename = "Kakao")]
    Cocoa,
    #[serde(rename = "Tebu")]
    Sugarcane,
    #[serde(rename = "Teh")]
    Tea,
    #[serde(rename = "Tembakau")]
    Tobacco,
}
impl Commodity {
    pub const COUNT: usize = 8;
    pub const ALL: [Commodity; Self::COUNT] = [
        Commodity::OilPalm,
        Commodity::Coconut,
        Commodity::Rubber,
        Commodity::Coffee,
        Commodity::Cocoa,
        Commodity::Sugarcane,
        Commodity::Tea,
        Commodity::Tobacco,
    ];
    pub fn index(self) -> usize {
        self as usize
    }
    /// Canonical column label assigned to the source column.
    pub fn column_name(self) -> &'static str {
        match self {
            Commodity::OilPalm => "Kelapa_Sawit",
            Commodity::Coconut => "Kelapa",
            Commodity::Rubber => "Karet",
            Commodity::Coffee => "Kopi",
            Commodity::Cocoa => "Kakao",
            Commodity::Sugarcane => "Tebu",
            Commodity::Tea => "Teh",
            Commodity::Tobacco => "Tembakau",
        }
    }
    pub fn display_name(self) -> String {
        self.column_name().replace('_', " ")
    }
    fn variant_name(self) -> &'static str {
        match self {
            Commodity::OilPalm => "OilPalm",
            Commodity::Coconut => "Coconut",
            Commodity::Rubber => "Rubber",
            Commodity::Coffee => "Coffee",
            Commodity::Cocoa => "Cocoa",
            Commodity::Sugarcane => "Sugarcane",
            Commodity::Tea => "Tea",
            Commodity::Tobacco => "Tobacco",
        }
    }
}
impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown commodity '{0}'; expected one of Kelapa_Sawit, Kelapa, Karet, Kopi, Kakao, Tebu, Teh, Tembakau")]
pub struct UnknownCommodity(pub String);
impl FromStr for Commodity {
    type Err = UnknownCommodity;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Commodity::ALL
            .into_iter()
            .find(|c| {
                wanted.eq_ignore_ascii_case(c.column_name())
                    || wanted.eq_ignore_ascii_case(&c.display_name())
                    || wanted.eq_ignore_ascii_case(c.variant_name())
            })
            .ok_or_else(|| UnknownCommodity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn display_names_replace_underscores() {
        assert_eq!(Commodity::OilPalm.display_name(), "Kelapa Sawit");
        assert_eq!(Commodity::Tobacco.display_name(), "Tembakau");
    }
    #[test]
    fn parses_labels_display_names_and_variants() {
        assert_eq!("kelapa_sawit".parse(), Ok(Commodity::OilPalm));
        assert_eq!("Kelapa Sawit".parse(), Ok(Commodity::OilPalm));
        assert_eq!("coffee".parse(), Ok(Commodity::Coffee));
        assert_eq!(" Teh ".parse(), Ok(Commodity::Tea));
        assert!("Cengkeh".parse::<Commodity>().is_err());
    }
    #[test]
    fn index_follows_column_order() {
        for (i, commodity) in Commodity::ALL.iter().enumerate() {
            assert_eq!(commodity.index(), i);
        }
    }
}
