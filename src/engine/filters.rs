// src/engine/filters.rs
//
// Filter Predicate Set
//
// Filter logic:
// - Every filter is named and independently optional
// - Active predicates are AND'd; there is no OR and no negation
// - Unset means "no constraint", never "match nothing"
// - Output keeps the input's relative order

use serde::{Deserialize, Serialize};

use crate::domain::{City, DomainError, DomainResult, Message, MessageStatus, Property};

/// A conjunctive set of predicates over one record type
pub trait RecordFilter<R>: Send + Sync + 'static {
    /// True when every active predicate holds for `record`
    fn matches(&self, record: &R) -> bool;

    /// True when no predicate is active
    fn is_unconstrained(&self) -> bool;
}

/// Apply a filter set, returning the matching subsequence
pub fn apply_filters<R, F>(records: &[R], filter: &F) -> Vec<R>
where
    R: Clone,
    F: RecordFilter<R> + ?Sized,
{
    if filter.is_unconstrained() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

// ============================================================================
// PROPERTY FILTERS
// ============================================================================

/// Listing browser filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub city: Option<City>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub rooms: Option<u32>,
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Build from raw form values. Blank inputs are unset.
    ///
    /// Rooms accept the "3+1" layout notation and keep the leading count.
    pub fn parse(city: &str, min_price: &str, max_price: &str, rooms: &str) -> DomainResult<Self> {
        let city = match blank_to_none(city) {
            Some(c) => Some(c.parse::<City>()?),
            None => None,
        };

        let rooms = match blank_to_none(rooms) {
            Some(r) => {
                let count = r.split('+').next().unwrap_or(r).trim();
                Some(count.parse::<u32>().map_err(|_| DomainError::InvalidField {
                    field: "rooms".to_string(),
                    reason: format!("'{}' is not a room count", r),
                })?)
            }
            None => None,
        };

        Ok(Self {
            city,
            min_price: parse_bound("minPrice", min_price)?,
            max_price: parse_bound("maxPrice", max_price)?,
            rooms,
        })
    }

    fn match_city(&self, property: &Property) -> bool {
        self.city.map_or(true, |city| property.city == city)
    }

    /// A listing without a price never satisfies an active bound
    fn match_price(&self, property: &Property) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }
        let Some(price) = property.price else {
            return false;
        };
        self.min_price.map_or(true, |min| price >= min) && self.max_price.map_or(true, |max| price <= max)
    }

    fn match_rooms(&self, property: &Property) -> bool {
        self.rooms.map_or(true, |rooms| property.rooms == Some(rooms))
    }
}

impl RecordFilter<Property> for PropertyFilter {
    fn matches(&self, property: &Property) -> bool {
        self.match_city(property) && self.match_price(property) && self.match_rooms(property)
    }

    fn is_unconstrained(&self) -> bool {
        self.city.is_none() && self.min_price.is_none() && self.max_price.is_none() && self.rooms.is_none()
    }
}

fn blank_to_none(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_bound(field: &str, value: &str) -> DomainResult<Option<f64>> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(v) => match v.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
            _ => Err(DomainError::InvalidField {
                field: field.to_string(),
                reason: format!("'{}' is not a non-negative number", v),
            }),
        },
    }
}

// ============================================================================
// MESSAGE FILTERS
// ============================================================================

/// Inbox filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFilter {
    pub status: Option<MessageStatus>,
}

impl MessageFilter {
    pub fn unread() -> Self {
        Self {
            status: Some(MessageStatus::Unread),
        }
    }
}

impl RecordFilter<Message> for MessageFilter {
    fn matches(&self, message: &Message) -> bool {
        self.status.map_or(true, |status| message.status == status)
    }

    fn is_unconstrained(&self) -> bool {
        self.status.is_none()
    }
}
