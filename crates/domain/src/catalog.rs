// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The controlled vocabulary offered by the preference forms.

use crate::entry::SelectionEntry;
use crate::selection::{Category, SelectionSet};

/// Name of the promoted interest subset.
pub const TOP_CHOICES: &str = "Top Choices";

const TOP_INTERESTS: &[&str] = &[
    "Coffee Culture",
    "Local Food & Cuisine",
    "Museums",
    "Nightlife",
    "Live Music",
    "Hiking",
    "Beaches",
    "Photography",
    "Art Galleries",
    "Craft Beer",
];

const MORE_INTERESTS: &[&str] = &[
    "Architecture",
    "Street Art",
    "History",
    "Wine",
    "Vegan Food",
    "Street Food",
    "Shopping",
    "Theater",
    "Dancing",
    "Fitness",
    "Yoga",
    "Surfing",
    "Cycling",
    "Running",
    "Board Games",
    "Books & Literature",
    "Film",
    "Fashion",
    "Nature",
    "Wildlife",
    "Volunteering",
    "Technology",
    "Entrepreneurship",
    "LGBTQ+ Friendly",
    "Family Friendly",
    "Pet Friendly",
];

const ACTIVITIES: &[&str] = &[
    "Walking Tours",
    "Food Tours",
    "Cooking Classes",
    "Wine Tasting",
    "Bike Tours",
    "Kayaking",
    "Snorkeling",
    "Scuba Diving",
    "Day Trips",
    "Language Exchange",
    "Pub Crawls",
    "Sunset Watching",
    "Camping",
    "Skiing",
    "Boat Tours",
];

const EVENTS: &[&str] = &[
    "Food Festivals",
    "Concerts",
    "Art Exhibitions",
    "Sporting Events",
    "Farmers Markets",
    "Travel Meetups",
    "Cultural Festivals",
    "Comedy Shows",
    "Film Screenings",
    "Networking Events",
    "Holiday Celebrations",
];

const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Mandarin Chinese",
    "Cantonese",
    "Japanese",
    "Korean",
    "Arabic",
    "Hindi",
    "Russian",
    "Dutch",
    "Turkish",
    "Vietnamese",
    "Thai",
    "Greek",
];

/// A named group of catalog entries that forms can select or clear at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedSubset {
    /// Display name of the subset.
    pub name: &'static str,
    /// Collection the subset belongs to.
    pub category: Category,
    /// Members of the subset.
    pub items: &'static [&'static str],
}

impl NamedSubset {
    /// Returns the members as catalog entries.
    #[must_use]
    pub fn entries(&self) -> Vec<SelectionEntry> {
        self.items
            .iter()
            .map(|item| SelectionEntry::catalog(*item))
            .collect()
    }
}

/// Read-only access to the controlled vocabulary.
pub struct Catalog;

impl Catalog {
    /// Every catalog item for a category, promoted items first.
    #[must_use]
    pub fn list(category: Category) -> Vec<&'static str> {
        match category {
            Category::Interests => TOP_INTERESTS
                .iter()
                .chain(MORE_INTERESTS.iter())
                .copied()
                .collect(),
            Category::Activities => ACTIVITIES.to_vec(),
            Category::Events => EVENTS.to_vec(),
            Category::Languages => LANGUAGES.to_vec(),
        }
    }

    /// The promoted interest subset.
    #[must_use]
    pub const fn top_choices() -> NamedSubset {
        NamedSubset {
            name: TOP_CHOICES,
            category: Category::Interests,
            items: TOP_INTERESTS,
        }
    }

    /// Looks up a named subset.
    ///
    /// Besides "Top Choices", every category is addressable as a subset by
    /// its capitalized name (e.g. "All Languages").
    #[must_use]
    pub fn named_subset(name: &str) -> Option<NamedSubset> {
        let subset: NamedSubset = match name {
            TOP_CHOICES => Self::top_choices(),
            "All Activities" => NamedSubset {
                name: "All Activities",
                category: Category::Activities,
                items: ACTIVITIES,
            },
            "All Events" => NamedSubset {
                name: "All Events",
                category: Category::Events,
                items: EVENTS,
            },
            "All Languages" => NamedSubset {
                name: "All Languages",
                category: Category::Languages,
                items: LANGUAGES,
            },
            _ => return None,
        };
        Some(subset)
    }

    /// Returns whether `text` is a catalog item of `category`.
    #[must_use]
    pub fn contains(category: Category, text: &str) -> bool {
        match category {
            Category::Interests => {
                TOP_INTERESTS.contains(&text) || MORE_INTERESTS.contains(&text)
            }
            Category::Activities => ACTIVITIES.contains(&text),
            Category::Events => EVENTS.contains(&text),
            Category::Languages => LANGUAGES.contains(&text),
        }
    }

    /// Tags a submitted string as a catalog or custom entry.
    #[must_use]
    pub fn classify(category: Category, text: &str) -> SelectionEntry {
        if Self::contains(category, text) {
            SelectionEntry::catalog(text)
        } else {
            SelectionEntry::custom(text)
        }
    }

    /// Builds a collection from submitted strings.
    ///
    /// Strings are trimmed; blanks are skipped and duplicates collapse.
    pub fn collect<I, S>(category: Category, texts: I) -> SelectionSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| text.as_ref().trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text| Self::classify(category, &text))
            .collect()
    }
}
