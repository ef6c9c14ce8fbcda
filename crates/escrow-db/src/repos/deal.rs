//! Deal repository: creation with sequential numbering, reads, and the
//! participant-gated mutations.
//!
//! The deal number is allocated explicitly before the entity is built, so a
//! `Deal` is a pure function of an already obtained sequence value. If the
//! insert fails after allocation the number stays consumed: sequences may
//! have gaps but never duplicates.

use escrow_core::access;
use escrow_core::entities::Deal;
use escrow_core::enums::Role;
use escrow_core::ids::{DEAL_COUNTER, PREFIX_DEAL};
use escrow_core::validate::require_non_empty;

use crate::error::{DatabaseError, ErrorKind};
use crate::helpers::{
    format_datetime, get_bool, get_opt_string, normalize_id, now, parse_datetime,
};
use crate::service::EscrowService;

const DEAL_COLUMNS: &str = "id, d_id, name, seller_id, buyer_id, exchange_id, status, \
                            accepted_by_seller, accepted_by_buyer, created_at";

fn row_to_deal(row: &libsql::Row) -> Result<Deal, DatabaseError> {
    Ok(Deal {
        id: row.get::<String>(0)?,
        d_id: row.get::<i64>(1)?,
        name: row.get::<String>(2)?,
        seller: row.get::<String>(3)?,
        buyer: row.get::<String>(4)?,
        exchange: get_opt_string(row, 5)?,
        messages: Vec::new(),
        status: get_opt_string(row, 6)?,
        accepted_by_seller: get_bool(row, 7)?,
        accepted_by_buyer: get_bool(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl EscrowService {
    /// Create a deal between `seller_id` and `buyer_id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank name or an unknown participant; a
    /// storage-kind error if allocation or the insert fails.
    pub async fn create_deal(
        &self,
        name: &str,
        seller_id: &str,
        buyer_id: &str,
    ) -> Result<Deal, DatabaseError> {
        self.create_deal_for_exchange(name, seller_id, buyer_id, None)
            .await
    }

    /// Create a deal that settles `exchange_id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_deal`], plus `InvalidArgument` for an unknown
    /// exchange.
    pub async fn create_deal_for_exchange(
        &self,
        name: &str,
        seller_id: &str,
        buyer_id: &str,
        exchange_id: Option<&str>,
    ) -> Result<Deal, DatabaseError> {
        require_non_empty("name", name)?;
        let seller_id = normalize_id(seller_id);
        let buyer_id = normalize_id(buyer_id);
        self.require_participant_exists("seller", &seller_id).await?;
        self.require_participant_exists("buyer", &buyer_id).await?;
        if let Some(exchange_id) = exchange_id {
            self.get_exchange(exchange_id).await.map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    DatabaseError::InvalidArgument(format!("unknown exchange {exchange_id}"))
                }
                _ => e,
            })?;
        }

        let d_id = self.allocate(DEAL_COUNTER).await?;
        let id = self.db().generate_id(PREFIX_DEAL).await?;
        let deal = Deal::new(id, d_id, name, &seller_id, &buyer_id, exchange_id, now());

        self.db()
            .execute(
                "create_deal",
                "INSERT INTO deals (id, d_id, name, seller_id, buyer_id, exchange_id, status,
                                    accepted_by_seller, accepted_by_buyer, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, 0, 0, ?7)",
                libsql::params![
                    deal.id.as_str(),
                    deal.d_id,
                    deal.name.as_str(),
                    deal.seller.as_str(),
                    deal.buyer.as_str(),
                    deal.exchange.as_deref(),
                    format_datetime(&deal.created_at)
                ],
            )
            .await
            .inspect_err(|error| {
                tracing::warn!(d_id, %error, "deal insert failed; sequence value stays consumed");
            })?;

        tracing::info!(deal_id = %deal.id, d_id, "deal created");
        Ok(deal)
    }

    async fn require_participant_exists(
        &self,
        role: &str,
        user_id: &str,
    ) -> Result<(), DatabaseError> {
        match self.get_user(user_id).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DatabaseError::InvalidArgument(
                format!("unknown {role} {user_id}"),
            )),
            Err(e) => Err(e),
        }
    }

    /// Look a deal up by record ID.
    ///
    /// # Errors
    ///
    /// `NotFound` if no deal has this ID.
    pub async fn get_deal(&self, id: &str) -> Result<Deal, DatabaseError> {
        let id = normalize_id(id);
        let sql = format!("SELECT {DEAL_COLUMNS} FROM deals WHERE id = ?1");
        let deal = self
            .db()
            .query_opt("get_deal", &sql, [id.as_str()], row_to_deal)
            .await?
            .ok_or_else(|| DatabaseError::not_found("deal", &id))?;
        self.with_messages(deal).await
    }

    /// Look a deal up by its sequential number.
    ///
    /// # Errors
    ///
    /// `NotFound` if no deal has this number.
    pub async fn get_deal_by_d_id(&self, d_id: i64) -> Result<Deal, DatabaseError> {
        let sql = format!("SELECT {DEAL_COLUMNS} FROM deals WHERE d_id = ?1");
        let deal = self
            .db()
            .query_opt("get_deal_by_d_id", &sql, [d_id], row_to_deal)
            .await?
            .ok_or_else(|| DatabaseError::not_found("deal", &d_id.to_string()))?;
        self.with_messages(deal).await
    }

    /// Every deal where `user_id` is seller or buyer, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn list_deals_for_user(&self, user_id: &str) -> Result<Vec<Deal>, DatabaseError> {
        let sql = format!(
            "SELECT {DEAL_COLUMNS} FROM deals
             WHERE seller_id = ?1 OR buyer_id = ?1
             ORDER BY d_id DESC"
        );
        let deals = self
            .db()
            .query_map(
                "list_deals_for_user",
                &sql,
                [normalize_id(user_id)],
                row_to_deal,
            )
            .await?;

        let mut out = Vec::with_capacity(deals.len());
        for deal in deals {
            out.push(self.with_messages(deal).await?);
        }
        Ok(out)
    }

    /// The deal `deal_id`, if `user_id` takes part in it.
    ///
    /// `None` covers both "no such deal" and "not a participant".
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn find_accessible_deal(
        &self,
        user_id: &str,
        deal_id: &str,
    ) -> Result<Option<Deal>, DatabaseError> {
        let sql = format!(
            "SELECT {DEAL_COLUMNS} FROM deals
             WHERE id = ?1 AND (seller_id = ?2 OR buyer_id = ?2)"
        );
        let deal = self
            .db()
            .query_opt(
                "find_accessible_deal",
                &sql,
                libsql::params![normalize_id(deal_id), normalize_id(user_id)],
                row_to_deal,
            )
            .await?;
        match deal {
            Some(deal) => Ok(Some(self.with_messages(deal).await?)),
            None => Ok(None),
        }
    }

    /// Role of `user_id` in deal `deal_id`; `Role::None` for an unknown deal.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the lookup fails.
    pub async fn role_of(&self, deal_id: &str, user_id: &str) -> Result<Role, DatabaseError> {
        match self.get_deal(deal_id).await {
            Ok(deal) => Ok(access::role_of(&deal, user_id)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Role::None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the lookup fails.
    pub async fn is_participant(&self, deal_id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        Ok(self.role_of(deal_id, user_id).await?.is_participant())
    }

    /// Record that `user_id` accepts the deal, on whichever side they hold.
    ///
    /// Accepting twice is a no-op.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown deal, `Forbidden` for a non-participant.
    pub async fn accept_deal(&self, deal_id: &str, user_id: &str) -> Result<Deal, DatabaseError> {
        let deal = self.get_deal(deal_id).await?;
        let sql = match access::role_of(&deal, user_id) {
            Role::Seller => "UPDATE deals SET accepted_by_seller = 1 WHERE id = ?1",
            Role::Buyer => "UPDATE deals SET accepted_by_buyer = 1 WHERE id = ?1",
            Role::None => {
                return Err(DatabaseError::Forbidden(format!(
                    "user {user_id} is not a participant of deal {deal_id}"
                )));
            }
        };
        self.db().execute("accept_deal", sql, [deal.id.as_str()]).await?;
        tracing::info!(deal_id = %deal.id, user_id, "deal accepted");
        self.get_deal(&deal.id).await
    }

    /// Set the free-form status label. Only participants may do so.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank status, `NotFound` for an unknown deal,
    /// `Forbidden` for a non-participant.
    pub async fn set_deal_status(
        &self,
        deal_id: &str,
        user_id: &str,
        status: &str,
    ) -> Result<Deal, DatabaseError> {
        require_non_empty("status", status)?;
        let deal = self.get_deal(deal_id).await?;
        if !access::is_participant(&deal, user_id) {
            return Err(DatabaseError::Forbidden(format!(
                "user {user_id} is not a participant of deal {deal_id}"
            )));
        }
        self.db()
            .execute(
                "set_deal_status",
                "UPDATE deals SET status = ?1 WHERE id = ?2",
                libsql::params![status, deal.id.as_str()],
            )
            .await?;
        self.get_deal(&deal.id).await
    }

    /// Append a message reference to the end of the deal's message list.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank message ID, `NotFound` for an unknown deal.
    pub async fn append_deal_message(
        &self,
        deal_id: &str,
        message_id: &str,
    ) -> Result<Deal, DatabaseError> {
        require_non_empty("message_id", message_id)?;
        let deal = self.get_deal(deal_id).await?;
        self.db()
            .execute(
                "append_deal_message",
                "INSERT INTO deal_messages (deal_id, position, message_id)
                 SELECT ?1, COALESCE(MAX(position), 0) + 1, ?2
                 FROM deal_messages WHERE deal_id = ?1",
                libsql::params![deal.id.as_str(), message_id],
            )
            .await?;
        self.get_deal(&deal.id).await
    }

    async fn with_messages(&self, mut deal: Deal) -> Result<Deal, DatabaseError> {
        deal.messages = self
            .db()
            .query_map(
                "deal_messages",
                "SELECT message_id FROM deal_messages WHERE deal_id = ?1 ORDER BY position",
                [deal.id.as_str()],
                |row| Ok(row.get::<String>(0)?),
            )
            .await?;
        Ok(deal)
    }
}
