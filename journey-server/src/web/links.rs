//! Page URL generation.
//!
//! The pages keep all of their state in the query string, so every link
//! that changes the sort, the selected route or the passenger count has to
//! carry the rest of the state along with it.

use crate::query::{JourneyType, PassengerCount, SearchForm, SortKey};

/// The state a listing page link encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLink<'a> {
    pub query: &'a str,
    pub sort: SortKey,
    pub selected: Option<&'a str>,
    pub from: &'a str,
    pub to: &'a str,
    pub journey_type: JourneyType,
    pub passengers: PassengerCount,
}

impl<'a> ListingLink<'a> {
    /// Link back to the listing a form produced, with nothing selected.
    pub fn for_form(form: &'a SearchForm) -> Self {
        Self {
            query: form.effective_query(),
            sort: form.sort,
            selected: None,
            from: &form.from_text,
            to: &form.to_text,
            journey_type: form.journey_type,
            passengers: form.passengers,
        }
    }

    /// Link to a listing for a bare query.
    pub fn for_query(query: &'a str, passengers: PassengerCount) -> Self {
        Self {
            query,
            sort: SortKey::default(),
            selected: None,
            from: "",
            to: "",
            journey_type: JourneyType::default(),
            passengers,
        }
    }

    /// Render as a `/listing?...` URL.
    ///
    /// Blank from/to and the default journey type are left out; they parse
    /// back to the same values.
    ///
    /// ```
    /// use journey_server::query::{JourneyType, PassengerCount, SortKey};
    /// use journey_server::web::ListingLink;
    ///
    /// let link = ListingLink {
    ///     selected: Some("3"),
    ///     to: "Chennai Egmore",
    ///     journey_type: JourneyType::RoundTrip,
    ///     sort: SortKey::Duration,
    ///     ..ListingLink::for_query("tiruchi & co", PassengerCount::clamped(2))
    /// };
    /// assert_eq!(
    ///     link.href(),
    ///     "/listing?q=tiruchi%20%26%20co&sort=duration&selected=3\
    ///      &to=Chennai%20Egmore&journey_type=round-trip&passengers=2"
    /// );
    /// ```
    pub fn href(&self) -> String {
        let mut url = format!(
            "/listing?q={}&sort={}",
            urlencoding::encode(self.query),
            self.sort.as_str()
        );
        if let Some(id) = self.selected {
            push_param(&mut url, "selected", id);
        }
        push_trip(&mut url, self.from, self.to, self.journey_type);
        url.push_str(&format!("&passengers={}", self.passengers.get()));
        url
    }

    /// Same state, different sort.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self { sort, ..self.clone() }
    }

    /// Same state, different selected route.
    pub fn with_selected(&self, id: &'a str) -> Self {
        Self {
            selected: Some(id),
            ..self.clone()
        }
    }
}

/// Landing page URL that restores a form.
///
/// The free-text query and sort belong to the listing and are not carried.
pub fn index_href(form: &SearchForm) -> String {
    let mut url = format!("/?passengers={}", form.passengers.get());
    push_trip(&mut url, &form.from_text, &form.to_text, form.journey_type);
    url
}

fn push_trip(url: &mut String, from: &str, to: &str, journey_type: JourneyType) {
    if !from.is_empty() {
        push_param(url, "from", from);
    }
    if !to.is_empty() {
        push_param(url, "to", to);
    }
    if journey_type != JourneyType::default() {
        push_param(url, "journey_type", journey_type.as_str());
    }
}

fn push_param(url: &mut String, key: &str, value: &str) {
    url.push('&');
    url.push_str(key);
    url.push('=');
    url.push_str(&urlencoding::encode(value));
}
