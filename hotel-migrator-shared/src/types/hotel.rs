/// A hotel property, the fact entity of the migration.
///
/// `category_id` and `chain_id` reference [`crate::Category`] and
/// [`crate::Chain`] ids and are carried as text, exactly like the dimension
/// keys. `location` is the rendered `"<latitude>,<longitude>"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub category_id: Option<String>,
    pub chain_id: Option<String>,
    pub location: String,
}
