use crate::models::Activity;

// Raw `activities` row; `participants` holds a JSON array of emails.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: String,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = serde_json::Error;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let participants: Vec<String> = serde_json::from_str(&row.participants)?;
        Ok(Activity {
            name: row.name,
            description: row.description,
            schedule: row.schedule,
            max_participants: row.max_participants,
            participants,
        })
    }
}
