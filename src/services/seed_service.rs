use tracing::info;

use crate::database::{ActivityStore, StoreResult};
use crate::models::Activity;
use crate::services::activities_service::LIST_LIMIT;

#[derive(Debug, Default)]
pub struct SeedReport {
    pub deleted: u64,
    pub inserted: u64,
    pub names: Vec<String>,
}

// (name, description, schedule, max_participants, participants)
const SEED_ACTIVITIES: &[(&str, &str, &str, i64, [&str; 2])] = &[
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        ["michael@mergington.edu", "daniel@mergington.edu"],
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        ["emma@mergington.edu", "sophia@mergington.edu"],
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        ["john@mergington.edu", "olivia@mergington.edu"],
    ),
    (
        "Soccer Team",
        "Join the school soccer team and compete in local leagues",
        "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        22,
        ["lucas@mergington.edu", "mia@mergington.edu"],
    ),
    (
        "Basketball Club",
        "Practice basketball skills and play friendly matches",
        "Wednesdays, 3:30 PM - 5:00 PM",
        15,
        ["liam@mergington.edu", "ava@mergington.edu"],
    ),
    (
        "Drama Club",
        "Participate in theater productions and acting workshops",
        "Mondays, 4:00 PM - 5:30 PM",
        18,
        ["noah@mergington.edu", "isabella@mergington.edu"],
    ),
    (
        "Art Workshop",
        "Explore painting, drawing, and other visual arts",
        "Fridays, 2:00 PM - 3:30 PM",
        16,
        ["amelia@mergington.edu", "benjamin@mergington.edu"],
    ),
    (
        "Math Olympiad",
        "Prepare for math competitions and solve challenging problems",
        "Thursdays, 3:30 PM - 5:00 PM",
        10,
        ["charlotte@mergington.edu", "elijah@mergington.edu"],
    ),
    (
        "Debate Club",
        "Develop public speaking and argumentation skills",
        "Wednesdays, 4:00 PM - 5:30 PM",
        14,
        ["william@mergington.edu", "sophia@mergington.edu"],
    ),
];

/// The fixed dataset the collection is reset to.
pub fn seed_activities() -> Vec<Activity> {
    SEED_ACTIVITIES
        .iter()
        .map(
            |(name, description, schedule, max_participants, participants)| Activity {
                name: name.to_string(),
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants: *max_participants,
                participants: participants.iter().map(|p| p.to_string()).collect(),
            },
        )
        .collect()
}

/// Wipes the collection and inserts the seed dataset.
///
/// Deletion and insertion are separate steps: if the insert fails the
/// collection stays empty.
pub async fn reseed(store: &dyn ActivityStore) -> StoreResult<SeedReport> {
    let deleted = store.delete_all().await?;
    info!("🧹 Removed {} existing activities", deleted);

    let inserted = store.insert_many(&seed_activities()).await?;
    info!("🌱 Inserted {} seed activities", inserted);

    let names = store
        .list(LIST_LIMIT)
        .await?
        .into_iter()
        .map(|a| a.name)
        .collect();

    Ok(SeedReport {
        deleted,
        inserted,
        names,
    })
}
