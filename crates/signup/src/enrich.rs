use crate::dates::{add_months, format_mdy, DatePolicy};
use crate::model::{ContactRecord, EnrichedContact, Months};

/// Work out membership length, start and expiration for a contact.
///
/// Notes always start with the promotion. Without a class day nothing
/// else is derived.
pub fn enrich(contact: &ContactRecord, policy: &DatePolicy) -> EnrichedContact {
    let mut enriched = EnrichedContact {
        contact: contact.clone(),
        notes: contact.promotion.clone(),
        months: None,
        starts: String::new(),
        expires: String::new(),
    };

    let Some(class_day) = contact.class_day else {
        return enriched;
    };

    let months = Months::from_promotion(&contact.promotion);
    enriched.months = Some(months);
    enriched.starts = format_mdy(class_day);

    let expires = months
        .count()
        .and_then(|n| add_months(class_day, n as i32))
        .map(|end| format_mdy(policy.nearest_class_date(end)));

    match expires {
        Some(expires) => {
            enriched.notes = format!("{} starts {} expires {}", enriched.notes, enriched.starts, expires);
            enriched.expires = expires;
        }
        None => {
            enriched.notes = format!("{} starts {}", enriched.notes, enriched.starts);
        }
    }

    enriched
}
