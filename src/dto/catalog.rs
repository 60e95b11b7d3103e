use crate::domain::place::{Category, District, Place};

/// Selectable entry of the catalog filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptionDto {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

impl FilterOptionDto {
    pub fn category(value: &Category, selected: bool) -> Self {
        Self {
            id: value.id.as_str().to_string(),
            name: value.name.as_str().to_string(),
            selected,
        }
    }

    pub fn district(value: &District, selected: bool) -> Self {
        Self {
            id: value.id.as_str().to_string(),
            name: value.name.as_str().to_string(),
            selected,
        }
    }
}

/// Both dictionaries of the catalog filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptionsDto {
    pub categories: Vec<FilterOptionDto>,
    pub districts: Vec<FilterOptionDto>,
}

/// Catalog card.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCardDto {
    pub id: String,
    pub name: String,
    pub photo_url: Option<String>,
    /// Hidden cards are already part of the route being edited.
    pub selectable: bool,
}

impl PlaceCardDto {
    pub fn new(place: &Place, selectable: bool) -> Self {
        Self {
            id: place.id.as_str().to_string(),
            name: place.name.as_str().to_string(),
            photo_url: place.cover_photo().map(|p| p.as_str().to_string()),
            selectable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PhotoRef, PlaceId, PlaceName};

    #[test]
    fn card_uses_first_photo() {
        let place = Place {
            id: PlaceId::new("p1").unwrap(),
            name: PlaceName::new("Park").unwrap(),
            photos: vec![PhotoRef::new("a.jpg").unwrap(), PhotoRef::new("b.jpg").unwrap()],
            description: None,
            cost: None,
            coordinates: None,
            category: None,
            district: None,
        };
        let card = PlaceCardDto::new(&place, true);
        assert_eq!(card.photo_url.as_deref(), Some("a.jpg"));
    }
}
