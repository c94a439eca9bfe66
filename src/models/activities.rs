use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// An extracurricular activity and its participant roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() as i64 >= self.max_participants
    }

    pub fn details(&self) -> ActivityDetails<'_> {
        ActivityDetails {
            description: &self.description,
            schedule: &self.schedule,
            max_participants: self.max_participants,
            participants: &self.participants,
        }
    }
}

// Wire shape of an activity inside the listing; the name is the map key.
#[derive(Debug, Serialize)]
pub struct ActivityDetails<'a> {
    pub description: &'a str,
    pub schedule: &'a str,
    pub max_participants: i64,
    pub participants: &'a [String],
}

/// Activities keyed by name, serialized as a JSON object in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityListing {
    activities: Vec<Activity>,
}

impl ActivityListing {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl Serialize for ActivityListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in &self.activities {
            map.serialize_entry(&activity.name, &activity.details())?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess_club() -> Activity {
        Activity {
            name: "Chess Club".to_string(),
            description: "Learn strategies".to_string(),
            schedule: "Fridays".to_string(),
            max_participants: 2,
            participants: vec!["michael@x".to_string()],
        }
    }

    #[test]
    fn listing_is_keyed_by_name_without_the_name_field() {
        let listing = ActivityListing::new(vec![chess_club()]);
        let value = serde_json::to_value(&listing).unwrap();

        let entry = &value["Chess Club"];
        assert_eq!(entry["description"], "Learn strategies");
        assert_eq!(entry["schedule"], "Fridays");
        assert_eq!(entry["max_participants"], 2);
        assert_eq!(entry["participants"], serde_json::json!(["michael@x"]));
        assert!(entry.get("name").is_none());
    }

    #[test]
    fn listing_keeps_storage_order() {
        let mut drama = chess_club();
        drama.name = "Drama Club".to_string();
        let mut art = chess_club();
        art.name = "Art Workshop".to_string();

        let listing = ActivityListing::new(vec![drama, art]);
        let value = serde_json::to_value(&listing).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["Drama Club", "Art Workshop"]);
    }

    #[test]
    fn capacity_counts_current_participants() {
        let mut activity = chess_club();
        assert!(!activity.is_full());
        activity.participants.push("daniel@x".to_string());
        assert!(activity.is_full());
        assert!(activity.has_participant("daniel@x"));
        assert!(!activity.has_participant("new@x"));
    }
}
