/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL for table creation and indexing. All methods
/// return `&'static str` so implementors can build them with
/// `const_format::concatcp!`.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

/// Creates the table and indices for `T` if they do not already exist.
pub async fn create<T>(client: &tokio_postgres::Client) -> Result<(), super::PgErr>
where
    T: Schema,
{
    log::debug!("ensuring table {}", T::name());
    client.batch_execute(T::creates()).await?;
    client.batch_execute(T::indices()).await?;
    Ok(())
}
