use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{self, doc, Bson},
    options::IndexOptions,
    ClientSession, IndexModel,
};
use crate::{
    core::errors::{AppError, AppResult},
    db::{collections, is_duplicate_key_error, Database},
    domain::entities::{
        addresses::Address,
        users::{Cart, User, Wishlist},
    },
};
use super::UserStore;

/// MongoDB 사용자 리포지토리
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn users(&self) -> mongodb::Collection<User> {
        self.db.collection::<User>(collections::USERS)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email_lower": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_lower_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.users()
            .create_indexes([email_index, created_at_index])
            .await?;

        for name in [collections::CARTS, collections::WISHLISTS] {
            let owner_index = IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build())
                .build();

            self.db.collection::<bson::Document>(name)
                .create_index(owner_index)
                .await?;
        }

        Ok(())
    }

    async fn insert_bundle(
        &self,
        session: &mut ClientSession,
        user: &User,
        cart: &Cart,
        wishlist: &Wishlist,
    ) -> Result<(), mongodb::error::Error> {
        self.users()
            .insert_one(user)
            .session(&mut *session)
            .await?;

        self.db.collection::<Cart>(collections::CARTS)
            .insert_one(cart)
            .session(&mut *session)
            .await?;

        self.db.collection::<Wishlist>(collections::WISHLISTS)
            .insert_one(wishlist)
            .session(&mut *session)
            .await?;

        Ok(())
    }

    async fn delete_bundle(&self, session: &mut ClientSession, id: i64) -> Result<bool, mongodb::error::Error> {
        let deleted = self.users()
            .delete_one(doc! { "_id": id })
            .session(&mut *session)
            .await?;

        if deleted.deleted_count == 0 {
            return Ok(false);
        }

        self.db.collection::<Address>(collections::ADDRESSES)
            .delete_many(doc! { "user_id": id })
            .session(&mut *session)
            .await?;

        self.db.collection::<Cart>(collections::CARTS)
            .delete_many(doc! { "user_id": id })
            .session(&mut *session)
            .await?;

        self.db.collection::<Wishlist>(collections::WISHLISTS)
            .delete_many(doc! { "user_id": id })
            .session(&mut *session)
            .await?;

        Ok(true)
    }
}

fn duplicate_email_or_db(e: mongodb::error::Error) -> AppError {
    if is_duplicate_key_error(&e) {
        AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
    } else {
        AppError::from(e)
    }
}

fn optional_bson<T: Into<Bson>>(value: Option<T>) -> Bson {
    value.map(Into::into).unwrap_or(Bson::Null)
}

#[async_trait]
impl UserStore for UserRepository {
    async fn next_user_id(&self) -> AppResult<i64> {
        self.db.next_sequence(collections::USERS).await
    }

    async fn create_with_cart_and_wishlist(&self, user: User) -> AppResult<User> {
        let cart = Cart::for_user(self.db.next_sequence(collections::CARTS).await?, user.id);
        let wishlist = Wishlist::for_user(self.db.next_sequence(collections::WISHLISTS).await?, user.id);

        let mut session = self.db.begin().await?;

        if let Err(e) = self.insert_bundle(&mut session, &user, &cart, &wishlist).await {
            if let Err(abort_err) = session.abort_transaction().await {
                log::warn!("회원가입 트랜잭션 중단 실패: {}", abort_err);
            }
            return Err(duplicate_email_or_db(e));
        }

        session.commit_transaction().await.map_err(duplicate_email_or_db)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users()
            .find_one(doc! { "email_lower": email.to_lowercase() })
            .await?)
    }

    async fn update_profile(&self, user: &User) -> AppResult<bool> {
        let date_of_birth = user.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string());

        let result = self.users()
            .update_one(
                doc! { "_id": user.id },
                doc! { "$set": {
                    "name": user.name.as_str(),
                    "email": user.email.as_str(),
                    "email_lower": user.email_lower.as_str(),
                    "password_hash": user.password_hash.as_str(),
                    "role": user.role.as_str(),
                    "phone": optional_bson(user.phone.clone()),
                    "date_of_birth": optional_bson(date_of_birth),
                    "gender": optional_bson(user.gender.clone()),
                } },
            )
            .await
            .map_err(duplicate_email_or_db)?;

        Ok(result.matched_count > 0)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool> {
        let result = self.users()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "password_hash": password_hash } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete_cascade(&self, id: i64) -> AppResult<bool> {
        let mut session = self.db.begin().await?;

        match self.delete_bundle(&mut session, id).await {
            Ok(true) => {
                session.commit_transaction().await?;
                Ok(true)
            }
            Ok(false) => {
                session.abort_transaction().await?;
                Ok(false)
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    log::warn!("사용자 삭제 트랜잭션 중단 실패: {}", abort_err);
                }
                Err(e.into())
            }
        }
    }
}
