//! MongoDB implementations of the storage traits
//!
//! Documents carry an `ObjectId` under `_id`; the domain models use plain
//! hex strings, so each store converts at the boundary.

use async_trait::async_trait;
use common::error::{StoreError, StoreResult};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Sale, User, UserProfile};
use crate::storage::{SaleStore, UserStore};

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    password: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaleDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    article: String,
    price_for_one: f64,
    number_of_units: i64,
    amount: f64,
    date: String,
    seller_id: String,
}

impl From<SaleDocument> for Sale {
    fn from(doc: SaleDocument) -> Self {
        Sale {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            article: doc.article,
            price_for_one: doc.price_for_one,
            number_of_units: doc.number_of_units,
            amount: doc.amount,
            date: doc.date,
            seller_id: doc.seller_id,
        }
    }
}

fn parse_oid(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn inserted_id(result: mongodb::results::InsertOneResult) -> StoreResult<String> {
    result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .ok_or_else(|| StoreError::InvalidId("inserted id is not an ObjectId".to_string()))
}

/// User collection adapter
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: &User) -> StoreResult<String> {
        let document = UserDocument {
            id: None,
            username: user.username.clone(),
            password: user.password_digest.clone(),
            email: user.email.clone(),
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(StoreError::Query)?;

        let id = inserted_id(result)?;
        debug!(username = %user.username, %id, "user created");
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> StoreResult<UserProfile> {
        let filter = doc! { "username": username, "password": password_digest };

        let document = self
            .collection
            .find_one(filter)
            .await
            .map_err(StoreError::Query)?
            .ok_or(StoreError::Missing)?;

        Ok(UserProfile {
            id: document.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            username: document.username,
            email: document.email,
        })
    }
}

/// Sale collection adapter
#[derive(Clone)]
pub struct MongoSaleStore {
    collection: Collection<SaleDocument>,
}

impl MongoSaleStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl SaleStore for MongoSaleStore {
    async fn create(&self, sale: &Sale) -> StoreResult<String> {
        let document = SaleDocument {
            id: None,
            article: sale.article.clone(),
            price_for_one: sale.price_for_one,
            number_of_units: sale.number_of_units,
            amount: sale.amount,
            date: sale.date.clone(),
            seller_id: sale.seller_id.clone(),
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(StoreError::Query)?;

        let id = inserted_id(result)?;
        debug!(%id, "sale created");
        Ok(id)
    }

    async fn get_one(&self, id: &str) -> StoreResult<Sale> {
        let oid = parse_oid(id)?;

        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(StoreError::Query)?
            .ok_or(StoreError::Missing)?;

        Ok(document.into())
    }

    async fn get_all(&self) -> StoreResult<Vec<Sale>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(StoreError::Query)?;

        let documents: Vec<SaleDocument> =
            cursor.try_collect().await.map_err(StoreError::Query)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn update(&self, sale: &Sale) -> StoreResult<()> {
        let oid = parse_oid(&sale.id)?;

        // `_id` stays untouched; only the payload fields are replaced.
        let update = doc! {
            "$set": {
                "article": sale.article.as_str(),
                "price_for_one": sale.price_for_one,
                "number_of_units": sale.number_of_units,
                "amount": sale.amount,
                "date": sale.date.as_str(),
                "seller_id": sale.seller_id.as_str(),
            }
        };

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, update)
            .await
            .map_err(StoreError::Query)?;

        if result.matched_count == 0 {
            return Err(StoreError::Missing);
        }

        debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "sale updated"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let oid = parse_oid(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(StoreError::Query)?;

        if result.deleted_count == 0 {
            return Err(StoreError::Missing);
        }

        debug!(deleted = result.deleted_count, "sale deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_id_that_is_not_an_object_id() {
        assert!(matches!(parse_oid("42"), Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn accepts_a_valid_object_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_oid(&oid.to_hex()).unwrap(), oid);
    }
}
