use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{
    Address, BedType, Breakfast, CancelPolicy, CancelReason, Cancellation, City, CreatedAt,
    Guest, GuestName, HotelId, HotelName, HotelSnapshot, MaxGuests, Order, OrderId, OrderNumber,
    OrderSource, OrderStatus, Phone, Price, Remarks, RoomCount, RoomTypeId, RoomTypeName,
    RoomTypeSnapshot, StarRating, StayPeriod, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id).await
    }

    async fn find_by_phone(
        &self,
        con: &mut PostgresTransaction,
        phone: &Phone,
        limit: i64,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_by_phone(con, phone, limit).await
    }

    async fn exists_number(
        &self,
        con: &mut PostgresTransaction,
        number: &OrderNumber,
    ) -> error_stack::Result<bool, KernelError> {
        PgOrderInternal::exists_number(con, number).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::create(con, order).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::update(con, order).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_no: String,
    status: String,
    source: String,
    hotel_id: Uuid,
    room_type_id: Uuid,
    merchant_id: Uuid,
    check_in_date: Date,
    check_out_date: Date,
    room_count: i32,
    guest_name: String,
    phone: String,
    remarks: String,
    hotel_name_snapshot: String,
    hotel_city_snapshot: String,
    hotel_address_snapshot: String,
    star_rating_snapshot: i32,
    room_type_name_snapshot: String,
    bed_type_snapshot: String,
    breakfast_snapshot: bool,
    cancel_policy_snapshot: String,
    max_guests_snapshot: i32,
    unit_price: i64,
    total_price: i64,
    cancel_reason: Option<String>,
    cancelled_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
}

impl TryFrom<OrderRow> for Order {
    type Error = Report<KernelError>;
    fn try_from(value: OrderRow) -> Result<Self, Self::Error> {
        let stay = StayPeriod::new(value.check_in_date, value.check_out_date)
            .map_err(|report| report.change_context(KernelError::Internal))?;
        let cancel_policy = CancelPolicy::from_alias(&value.cancel_policy_snapshot)
            .ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable(format!(
                    "Unknown cancel policy: {}",
                    value.cancel_policy_snapshot
                ))
            })?;
        let cancellation = match (value.cancel_reason, value.cancelled_at) {
            (Some(reason), Some(at)) => Some(Cancellation::new(CancelReason::new(reason), at)),
            _ => None,
        };
        Ok(Order::new(
            OrderId::new(value.id),
            OrderNumber::new(value.order_no),
            value.status.parse::<OrderStatus>()?,
            value.source.parse::<OrderSource>()?,
            HotelId::new(value.hotel_id),
            RoomTypeId::new(value.room_type_id),
            UserId::new(value.merchant_id),
            stay,
            RoomCount::new(value.room_count),
            Guest::new(
                GuestName::new(value.guest_name),
                Phone::new(value.phone),
                Remarks::new(value.remarks),
            ),
            HotelSnapshot::new(
                HotelName::new(value.hotel_name_snapshot),
                City::new(value.hotel_city_snapshot),
                Address::new(value.hotel_address_snapshot),
                StarRating::new(value.star_rating_snapshot),
            ),
            RoomTypeSnapshot::new(
                RoomTypeName::new(value.room_type_name_snapshot),
                BedType::new(value.bed_type_snapshot),
                Breakfast::new(value.breakfast_snapshot),
                cancel_policy,
                MaxGuests::new(value.max_guests_snapshot),
            ),
            Price::new(value.unit_price),
            Price::new(value.total_price),
            cancellation,
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let row = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, order_no, status, source, hotel_id, room_type_id, merchant_id,
                   check_in_date, check_out_date, room_count, guest_name, phone, remarks,
                   hotel_name_snapshot, hotel_city_snapshot, hotel_address_snapshot,
                   star_rating_snapshot, room_type_name_snapshot, bed_type_snapshot,
                   breakfast_snapshot, cancel_policy_snapshot, max_guests_snapshot,
                   unit_price, total_price, cancel_reason, cancelled_at, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Order::try_from).transpose()
    }

    async fn find_by_phone(
        con: &mut PgConnection,
        phone: &Phone,
        limit: i64,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, order_no, status, source, hotel_id, room_type_id, merchant_id,
                   check_in_date, check_out_date, room_count, guest_name, phone, remarks,
                   hotel_name_snapshot, hotel_city_snapshot, hotel_address_snapshot,
                   star_rating_snapshot, room_type_name_snapshot, bed_type_snapshot,
                   breakfast_snapshot, cancel_policy_snapshot, max_guests_snapshot,
                   unit_price, total_price, cancel_reason, cancelled_at, created_at
            FROM orders
            WHERE phone = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(phone.as_ref())
        .bind(limit)
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Order::try_from).collect()
    }

    async fn exists_number(
        con: &mut PgConnection,
        number: &OrderNumber,
    ) -> error_stack::Result<bool, KernelError> {
        sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM orders WHERE order_no = $1)
            "#,
        )
        .bind(number.as_ref())
        .fetch_one(con)
        .await
        .convert_error()
    }

    async fn create(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let hotel = order.hotel_snapshot();
        let room_type = order.room_type_snapshot();
        let cancellation = order.cancellation().as_ref();
        let result = sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO orders (id, order_no, status, source, hotel_id, room_type_id, merchant_id,
                                check_in_date, check_out_date, nights, room_count, guest_name,
                                phone, remarks, hotel_name_snapshot, hotel_city_snapshot,
                                hotel_address_snapshot, star_rating_snapshot,
                                room_type_name_snapshot, bed_type_snapshot, breakfast_snapshot,
                                cancel_policy_snapshot, max_guests_snapshot, unit_price,
                                total_price, cancel_reason, cancelled_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                    $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
            ON CONFLICT (order_no) DO NOTHING
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.number().as_ref())
        .bind(order.status().as_str())
        .bind(order.source().as_str())
        .bind(order.hotel_id().as_ref())
        .bind(order.room_type_id().as_ref())
        .bind(order.merchant_id().as_ref())
        .bind(order.stay().check_in())
        .bind(order.stay().check_out())
        .bind(order.stay().nights() as i32)
        .bind(order.room_count().as_ref())
        .bind(order.guest().name().as_ref())
        .bind(order.guest().phone().as_ref())
        .bind(order.guest().remarks().as_ref())
        .bind(hotel.name().as_ref())
        .bind(hotel.city().as_ref())
        .bind(hotel.address().as_ref())
        .bind(hotel.star_rating().as_ref())
        .bind(room_type.name().as_ref())
        .bind(room_type.bed_type().as_ref())
        .bind(room_type.breakfast().as_ref())
        .bind(room_type.cancel_policy().as_str())
        .bind(room_type.max_guests().as_ref())
        .bind(order.unit_price().as_ref())
        .bind(order.total_price().as_ref())
        .bind(cancellation.map(|c| c.reason().as_ref().as_str()))
        .bind(cancellation.map(|c| *c.cancelled_at()))
        .bind(order.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Order number {} is already taken",
                order.number().as_ref()
            )));
        }
        Ok(())
    }

    async fn update(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let cancellation = order.cancellation().as_ref();
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE orders
            SET status = $2, cancel_reason = $3, cancelled_at = $4
            WHERE id = $1 AND status IN ('pending', 'confirmed')
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.status().as_str())
        .bind(cancellation.map(|c| c.reason().as_ref().as_str()))
        .bind(cancellation.map(|c| *c.cancelled_at()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(KernelError::Conflict.with_message("Order already cancelled"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{HotelQuery, OrderQuery};
    use kernel::interface::update::{HotelModifier, InventoryModifier, OrderModifier};
    use kernel::prelude::entity::{
        Address, Amenities, BedType, Breakfast, CancelPolicy, City, CreatedAt, Featured, Guest,
        GuestName, Hotel, HotelFilter, HotelId, HotelName, HotelStatus, Inventory, MaxGuests,
        OpeningDate, Order, OrderId, OrderNumber, OrderStatus, Phone, Price, Remarks, RoomCount,
        RoomType, RoomTypeId, RoomTypeName, RoomTypes, StarRating, StayPeriod, Tags, UpdatedAt,
        UserId,
    };
    use kernel::KernelError;

    use crate::database::{PostgresDatabase, PostgresHotelRepository, PostgresOrderRepository};

    fn hotel() -> Hotel {
        let now = OffsetDateTime::now_utc();
        Hotel::new(
            HotelId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            HotelName::new("西湖酒店"),
            HotelName::new("West Lake Hotel"),
            Address::new("1 Lake Road"),
            City::new("Hangzhou"),
            StarRating::new(5),
            OpeningDate::new(date!(2019 - 09 - 01)),
            Tags::new(vec!["lake".to_string(), "spa".to_string()]),
            Amenities::new(vec!["wifi".to_string()]),
            None,
            vec![],
            None,
            Featured::new(true),
            HotelStatus::Approved,
            None,
            RoomTypes::new(vec![RoomType::new(
                RoomTypeId::new(Uuid::new_v4()),
                RoomTypeName::new("Lake View"),
                Price::new(680),
                BedType::new("king"),
                Breakfast::new(true),
                CancelPolicy::FreeCancellation,
                MaxGuests::new(2),
                Inventory::new(3),
            )]),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn hotel_and_order_round_trip() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let hotel = hotel();
        PostgresHotelRepository.create(&mut con, &hotel).await?;
        let found = PostgresHotelRepository
            .find_by_id(&mut con, hotel.id())
            .await?;
        assert_eq!(found.as_ref().map(Hotel::id), Some(hotel.id()));

        let filter = HotelFilter::new(None, Some("west LAKE".into()), None, vec!["spa".into()]);
        let matched = PostgresHotelRepository.find_approved(&mut con, &filter).await?;
        assert!(matched.iter().any(|h| h.id() == hotel.id()));

        let room_type = hotel.room_types().iter().next().cloned().unwrap();
        let reserved = PostgresHotelRepository
            .try_reserve(&mut con, hotel.id(), room_type.id(), &RoomCount::new(3))
            .await?;
        assert!(reserved);
        let reserved = PostgresHotelRepository
            .try_reserve(&mut con, hotel.id(), room_type.id(), &RoomCount::new(1))
            .await?;
        assert!(!reserved);

        let number = OrderNumber::new(format!("TT{}", Uuid::new_v4().simple()));
        let order = Order::place(
            OrderId::new(Uuid::new_v4()),
            number.clone(),
            &hotel,
            &room_type,
            StayPeriod::new(date!(2024 - 05 - 01), date!(2024 - 05 - 04)).unwrap(),
            RoomCount::new(3),
            Guest::new(GuestName::new("Han Meimei"), Phone::new("13700000000"), Remarks::new("")),
            OffsetDateTime::now_utc(),
        )?;
        PostgresOrderRepository.create(&mut con, &order).await?;
        assert!(PostgresOrderRepository.exists_number(&mut con, &number).await?);

        let duplicate = order.clone().reconstruct(|o| o.id = OrderId::new(Uuid::new_v4()));
        let err = PostgresOrderRepository
            .create(&mut con, &duplicate)
            .await
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Concurrency);

        let mut cancelled = order.clone();
        cancelled.cancel(&Phone::new("13700000000"), None, OffsetDateTime::now_utc())?;
        PostgresOrderRepository.update(&mut con, &cancelled).await?;
        let found = PostgresOrderRepository
            .find_by_id(&mut con, order.id())
            .await?
            .unwrap();
        assert_eq!(found.status(), &OrderStatus::Cancelled);
        assert_eq!(found.total_price(), &Price::new(680 * 3 * 3));

        let by_phone = PostgresOrderRepository
            .find_by_phone(&mut con, &Phone::new("13700000000"), 50)
            .await?;
        assert!(by_phone.iter().any(|o| o.id() == order.id()));

        PostgresHotelRepository.delete(&mut con, hotel.id()).await?;
        assert!(PostgresHotelRepository
            .find_by_id(&mut con, hotel.id())
            .await?
            .is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn concurrent_cancels_release_once() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let hotel = hotel();
        let room_type = hotel.room_types().iter().next().cloned().unwrap();
        let phone = Phone::new("13600000000");
        let order = Order::place(
            OrderId::new(Uuid::new_v4()),
            OrderNumber::new(format!("TT{}", Uuid::new_v4().simple())),
            &hotel,
            &room_type,
            StayPeriod::new(date!(2024 - 06 - 01), date!(2024 - 06 - 02)).unwrap(),
            RoomCount::new(2),
            Guest::new(GuestName::new("Wei Hua"), phone.clone(), Remarks::new("")),
            OffsetDateTime::now_utc(),
        )?;

        let mut setup = db.transact().await?;
        PostgresHotelRepository.create(&mut setup, &hotel).await?;
        assert!(
            PostgresHotelRepository
                .try_reserve(&mut setup, hotel.id(), room_type.id(), order.room_count())
                .await?
        );
        PostgresOrderRepository.create(&mut setup, &order).await?;
        setup.commit().await?;

        let mut first = db.transact().await?;
        let mut second = db.transact().await?;
        let mut by_first = PostgresOrderRepository
            .find_by_id(&mut first, order.id())
            .await?
            .unwrap();
        let mut by_second = PostgresOrderRepository
            .find_by_id(&mut second, order.id())
            .await?
            .unwrap();
        by_first.cancel(&phone, None, OffsetDateTime::now_utc())?;
        by_second.cancel(&phone, None, OffsetDateTime::now_utc())?;

        PostgresOrderRepository.update(&mut first, &by_first).await?;
        PostgresHotelRepository
            .release(&mut first, hotel.id(), room_type.id(), order.room_count())
            .await?;
        let (committed, raced) = tokio::join!(
            first.commit(),
            PostgresOrderRepository.update(&mut second, &by_second)
        );
        committed?;
        assert_eq!(raced.unwrap_err().current_context(), &KernelError::Conflict);
        drop(second);

        let mut check = db.transact().await?;
        let stored = PostgresHotelRepository
            .find_by_id(&mut check, hotel.id())
            .await?
            .unwrap();
        assert_eq!(
            stored.room_types().find(room_type.id()).unwrap().inventory(),
            room_type.inventory()
        );
        PostgresHotelRepository.delete(&mut check, hotel.id()).await?;
        check.commit().await?;
        Ok(())
    }
}
