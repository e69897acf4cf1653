//! Built-in national hotline records.

use crate::model::service_record::ServiceRecord;

const BUILTIN: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    (
        "national-emergency",
        "National Emergency Number",
        "Emergency",
        "999",
        "All",
        "assets/emergency.png",
        "red",
    ),
    (
        "police",
        "Police Helpline Number",
        "Police",
        "999",
        "Police",
        "assets/police.png",
        "blue",
    ),
    (
        "fire-service",
        "Fire Service Number",
        "Fire Service",
        "999",
        "Fire",
        "assets/fire-service.png",
        "red",
    ),
    (
        "ambulance",
        "Ambulance Service",
        "Ambulance",
        "1994-999999",
        "Health",
        "assets/ambulance.png",
        "red",
    ),
    (
        "women-child-helpline",
        "Women & Child Helpline",
        "Women & Child Helpline",
        "109",
        "Help",
        "assets/emergency.png",
        "pink",
    ),
    (
        "anti-corruption",
        "Anti-Corruption Helpline",
        "Anti-Corruption",
        "106",
        "Govt.",
        "assets/emergency.png",
        "green",
    ),
    (
        "electricity-outage",
        "Electricity Helpline",
        "Electricity Outage",
        "16216",
        "Electricity",
        "assets/emergency.png",
        "yellow",
    ),
    (
        "brac",
        "Brac Helpline",
        "Brac",
        "16445",
        "NGO",
        "assets/brac.png",
        "green",
    ),
    (
        "bangladesh-railway",
        "Bangladesh Railway Helpline",
        "Bangladesh Railway",
        "163",
        "Travel",
        "assets/Bangladesh-Railway.png",
        "green",
    ),
];

pub(super) fn records() -> Vec<ServiceRecord> {
    BUILTIN
        .iter()
        .map(
            |&(id, name, short_name, number, category, icon_ref, color_ref)| ServiceRecord {
                id: id.to_string(),
                name: name.to_string(),
                short_name: short_name.to_string(),
                number: number.to_string(),
                category: category.to_string(),
                icon_ref: icon_ref.to_string(),
                color_ref: color_ref.to_string(),
            },
        )
        .collect()
}
