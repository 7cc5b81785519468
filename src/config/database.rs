use crate::{
    constants::{DB_NAME, MONGODB_URI, USER_ANSWER_COL_NAME, USER_COL_NAME, USER_LEVEL_COL_NAME},
    models::{user_answer_model::UserAnswer, user_level_model::UserLevel, user_model::User},
};
use mongodb::{
    Client, Collection, IndexModel,
    bson::doc,
    error::Error as MongoError,
    options::{ClientOptions, IndexOptions},
};

pub async fn connect_to_database() -> Result<Client, MongoError> {
    let client_uri = (*MONGODB_URI).as_str();

    let client_options = ClientOptions::parse(client_uri).await?;
    Client::with_options(client_options)
}

pub async fn get_collection<T>(
    client: &Client,
    collection_name: &str,
) -> Result<Collection<T>, MongoError>
where
    T: serde::de::DeserializeOwned + serde::Serialize + Unpin + Send + Sync,
{
    Ok(client.database(&DB_NAME).collection::<T>(collection_name))
}

async fn create_partial_unique_index(
    collection: &Collection<User>,
    field: &str,
) -> Result<(), MongoError> {
    let index = IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(doc! { field: { "$exists": true, "$type": "string" } })
                .build(),
        )
        .build();

    collection.create_index(index).await?;
    Ok(())
}

async fn create_compound_unique_index<T>(
    collection: &Collection<T>,
    first: &str,
    second: &str,
) -> Result<(), MongoError>
where
    T: serde::de::DeserializeOwned + serde::Serialize + Unpin + Send + Sync,
{
    let index = IndexModel::builder()
        .keys(doc! { first: 1, second: 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    collection.create_index(index).await?;
    Ok(())
}

/// Startup index creation. The compound indexes are the backstop for the
/// "one answer per user per question" and "one progress record per user per
/// branch" invariants.
pub async fn create_unique_indexes(client: &Client) -> Result<(), MongoError> {
    let users = get_collection::<User>(client, &USER_COL_NAME).await?;
    create_partial_unique_index(&users, "email").await?;

    let answers = get_collection::<UserAnswer>(client, &USER_ANSWER_COL_NAME).await?;
    create_compound_unique_index(&answers, "user_id", "question_id").await?;

    let levels = get_collection::<UserLevel>(client, &USER_LEVEL_COL_NAME).await?;
    create_compound_unique_index(&levels, "user_id", "branch_id").await?;

    Ok(())
}
