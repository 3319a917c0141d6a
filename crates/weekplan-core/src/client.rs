use crate::error::{PlannerError, Result};
use crate::types::{Category, Client, Table};

/// Append a client with a fresh id and no week statuses.
pub fn add_client(table: &mut Table, category: Category, name: impl Into<String>) -> Client {
    let id = format!(
        "{}{}",
        category.id_prefix(),
        uuid::Uuid::new_v4().simple()
    );
    let client = Client::new(id, name);
    table.clients.push(client.clone());
    client
}

pub fn rename_client(table: &mut Table, id: &str, name: impl Into<String>) -> Result<Client> {
    let client = find_client_mut(table, id)?;
    client.name = name.into();
    Ok(client.clone())
}

/// Remove a client together with all of its week statuses.
pub fn remove_client(table: &mut Table, id: &str) -> Result<Client> {
    let pos = table
        .clients
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| PlannerError::ClientNotFound(id.to_string()))?;
    Ok(table.clients.remove(pos))
}

pub fn find_client<'a>(table: &'a Table, id: &str) -> Result<&'a Client> {
    table
        .clients
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| PlannerError::ClientNotFound(id.to_string()))
}

pub fn find_client_mut<'a>(table: &'a mut Table, id: &str) -> Result<&'a mut Client> {
    table
        .clients
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| PlannerError::ClientNotFound(id.to_string()))
}
