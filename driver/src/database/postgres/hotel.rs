use std::collections::HashMap;

use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::HotelQuery;
use kernel::interface::update::{HotelModifier, InventoryModifier};
use kernel::prelude::entity::{
    Address, Amenities, BannerLimit, BedType, Breakfast, CancelPolicy, City, CreatedAt,
    Featured, GeoPoint, Hotel, HotelFilter, HotelId, HotelName, HotelStatus, ImageUrl,
    Inventory, MaxGuests, OpeningDate, Price, RejectReason, RoomCount, RoomType, RoomTypeId,
    RoomTypeName, RoomTypes, StarRating, Tags, UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresHotelRepository;

#[async_trait::async_trait]
impl HotelQuery for PostgresHotelRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError> {
        PgHotelInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError> {
        PgHotelInternal::lock(con, id).await?;
        PgHotelInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        PgHotelInternal::find_all(con).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresTransaction,
        owner: &UserId,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        PgHotelInternal::find_by_owner(con, owner).await
    }

    async fn find_approved(
        &self,
        con: &mut PostgresTransaction,
        filter: &HotelFilter,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        PgHotelInternal::find_approved(con, filter).await
    }

    async fn find_featured(
        &self,
        con: &mut PostgresTransaction,
        limit: &BannerLimit,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        PgHotelInternal::find_featured(con, limit).await
    }
}

#[async_trait::async_trait]
impl HotelModifier for PostgresHotelRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError> {
        PgHotelInternal::create(con, hotel).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError> {
        PgHotelInternal::update(con, hotel).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        hotel_id: &HotelId,
    ) -> error_stack::Result<(), KernelError> {
        PgHotelInternal::delete(con, hotel_id).await
    }
}

#[async_trait::async_trait]
impl InventoryModifier for PostgresHotelRepository {
    type Transaction = PostgresTransaction;

    async fn try_reserve(
        &self,
        con: &mut PostgresTransaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<bool, KernelError> {
        PgHotelInternal::try_reserve(con, hotel_id, room_type_id, count).await
    }

    async fn release(
        &self,
        con: &mut PostgresTransaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<(), KernelError> {
        PgHotelInternal::release(con, hotel_id, room_type_id, count).await
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    name_en: String,
    address: String,
    city: String,
    star_rating: i32,
    opening_date: Date,
    tags: Vec<String>,
    amenities: Vec<String>,
    banner_image: Option<String>,
    images: Vec<String>,
    lng: Option<f64>,
    lat: Option<f64>,
    featured: bool,
    status: String,
    reason: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl HotelRow {
    fn into_hotel(self, room_types: Vec<RoomType>) -> error_stack::Result<Hotel, KernelError> {
        let status = self
            .status
            .parse::<HotelStatus>()
            .map_err(|report| report.change_context(KernelError::Internal))?;
        let geo = match (self.lng, self.lat) {
            (Some(lng), Some(lat)) => Some(GeoPoint::new(lng, lat)),
            _ => None,
        };
        Ok(Hotel::new(
            HotelId::new(self.id),
            UserId::new(self.owner_id),
            HotelName::new(self.name),
            HotelName::new(self.name_en),
            Address::new(self.address),
            City::new(self.city),
            StarRating::new(self.star_rating),
            OpeningDate::new(self.opening_date),
            Tags::new(self.tags),
            Amenities::new(self.amenities),
            self.banner_image.map(ImageUrl::new),
            self.images.into_iter().map(ImageUrl::new).collect(),
            geo,
            Featured::new(self.featured),
            status,
            self.reason.map(RejectReason::new),
            RoomTypes::new(room_types),
            CreatedAt::new(self.created_at),
            UpdatedAt::new(self.updated_at),
        ))
    }
}

#[derive(sqlx::FromRow)]
struct RoomTypeRow {
    id: Uuid,
    hotel_id: Uuid,
    name: String,
    price: i64,
    bed_type: String,
    breakfast: bool,
    cancel_policy: String,
    max_guests: i32,
    inventory: i32,
}

impl TryFrom<RoomTypeRow> for RoomType {
    type Error = Report<KernelError>;
    fn try_from(value: RoomTypeRow) -> Result<Self, Self::Error> {
        let cancel_policy = CancelPolicy::from_alias(&value.cancel_policy).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown cancel policy: {}", value.cancel_policy))
        })?;
        Ok(RoomType::new(
            RoomTypeId::new(value.id),
            RoomTypeName::new(value.name),
            Price::new(value.price),
            BedType::new(value.bed_type),
            Breakfast::new(value.breakfast),
            cancel_policy,
            MaxGuests::new(value.max_guests),
            Inventory::new(value.inventory),
        ))
    }
}

pub(in crate::database) struct PgHotelInternal;

impl PgHotelInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError> {
        let row = sqlx::query_as::<_, HotelRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, name, name_en, address, city, star_rating, opening_date,
                   tags, amenities, banner_image, images, lng, lat, featured, status, reason,
                   created_at, updated_at
            FROM hotels
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        match row {
            Some(row) => Ok(Self::assemble(con, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Row locks on the hotel and its room types. Bookings and cancellations update
    /// `room_types` rows, so they wait until the locking transaction ends.
    async fn lock(con: &mut PgConnection, id: &HotelId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            SELECT id FROM hotels WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        sqlx::query(
            // language=postgresql
            r#"
            SELECT id FROM room_types WHERE hotel_id = $1 FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, name, name_en, address, city, star_rating, opening_date,
                   tags, amenities, banner_image, images, lng, lat, featured, status, reason,
                   created_at, updated_at
            FROM hotels
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble(con, rows).await
    }

    async fn find_by_owner(
        con: &mut PgConnection,
        owner: &UserId,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, name, name_en, address, city, star_rating, opening_date,
                   tags, amenities, banner_image, images, lng, lat, featured, status, reason,
                   created_at, updated_at
            FROM hotels
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble(con, rows).await
    }

    async fn find_approved(
        con: &mut PgConnection,
        filter: &HotelFilter,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, name, name_en, address, city, star_rating, opening_date,
                   tags, amenities, banner_image, images, lng, lat, featured, status, reason,
                   created_at, updated_at
            FROM hotels
            WHERE status = 'approved'
              AND ($1::text IS NULL OR city = $1)
              AND ($2::text IS NULL
                   OR strpos(lower(name), lower($2)) > 0
                   OR strpos(lower(name_en), lower($2)) > 0
                   OR strpos(lower(address), lower($2)) > 0
                   OR strpos(lower(city), lower($2)) > 0)
              AND ($3::integer IS NULL OR star_rating = $3)
              AND tags @> $4::text[]
            "#,
        )
        .bind(filter.city().as_ref().map(|city| city.as_ref().as_str()))
        .bind(filter.keyword().as_deref())
        .bind(filter.star().map(|star| *star.as_ref()))
        .bind(filter.tags().as_slice())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble(con, rows).await
    }

    async fn find_featured(
        con: &mut PgConnection,
        limit: &BannerLimit,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, name, name_en, address, city, star_rating, opening_date,
                   tags, amenities, banner_image, images, lng, lat, featured, status, reason,
                   created_at, updated_at
            FROM hotels
            WHERE status = 'approved' AND featured
            ORDER BY updated_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble(con, rows).await
    }

    /// Attaches room types to hotel rows, keeping row order.
    async fn assemble(
        con: &mut PgConnection,
        rows: Vec<HotelRow>,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let room_rows = sqlx::query_as::<_, RoomTypeRow>(
            // language=postgresql
            r#"
            SELECT id, hotel_id, name, price, bed_type, breakfast, cancel_policy, max_guests, inventory
            FROM room_types
            WHERE hotel_id = ANY($1)
            ORDER BY hotel_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(con)
        .await
        .convert_error()?;

        let mut grouped: HashMap<Uuid, Vec<RoomType>> = HashMap::new();
        for room_row in room_rows {
            let hotel_id = room_row.hotel_id;
            grouped
                .entry(hotel_id)
                .or_default()
                .push(RoomType::try_from(room_row)?);
        }
        rows.into_iter()
            .map(|row| {
                let room_types = grouped.remove(&row.id).unwrap_or_default();
                row.into_hotel(room_types)
            })
            .collect()
    }

    async fn create(con: &mut PgConnection, hotel: &Hotel) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO hotels (id, owner_id, name, name_en, address, city, star_rating, opening_date,
                                tags, amenities, banner_image, images, lng, lat, featured, status,
                                reason, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(hotel.id().as_ref())
        .bind(hotel.owner().as_ref())
        .bind(hotel.name().as_ref())
        .bind(hotel.name_en().as_ref())
        .bind(hotel.address().as_ref())
        .bind(hotel.city().as_ref())
        .bind(hotel.star_rating().as_ref())
        .bind(hotel.opening_date().as_ref())
        .bind(hotel.tags().as_ref())
        .bind(hotel.amenities().as_ref())
        .bind(hotel.banner_image().as_ref().map(|image| image.as_ref().as_str()))
        .bind(image_urls(hotel))
        .bind(hotel.geo().map(|geo| geo.lng))
        .bind(hotel.geo().map(|geo| geo.lat))
        .bind(hotel.featured().as_ref())
        .bind(hotel.status().as_str())
        .bind(hotel.reason().as_ref().map(|reason| reason.as_ref().as_str()))
        .bind(hotel.created_at().as_ref())
        .bind(hotel.updated_at().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::write_room_types(con, hotel).await
    }

    async fn update(con: &mut PgConnection, hotel: &Hotel) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE hotels
            SET name = $2, name_en = $3, address = $4, city = $5, star_rating = $6,
                opening_date = $7, tags = $8, amenities = $9, banner_image = $10, images = $11,
                lng = $12, lat = $13, featured = $14, status = $15, reason = $16, updated_at = $17
            WHERE id = $1
            "#,
        )
        .bind(hotel.id().as_ref())
        .bind(hotel.name().as_ref())
        .bind(hotel.name_en().as_ref())
        .bind(hotel.address().as_ref())
        .bind(hotel.city().as_ref())
        .bind(hotel.star_rating().as_ref())
        .bind(hotel.opening_date().as_ref())
        .bind(hotel.tags().as_ref())
        .bind(hotel.amenities().as_ref())
        .bind(hotel.banner_image().as_ref().map(|image| image.as_ref().as_str()))
        .bind(image_urls(hotel))
        .bind(hotel.geo().map(|geo| geo.lng))
        .bind(hotel.geo().map(|geo| geo.lat))
        .bind(hotel.featured().as_ref())
        .bind(hotel.status().as_str())
        .bind(hotel.reason().as_ref().map(|reason| reason.as_ref().as_str()))
        .bind(hotel.updated_at().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        let kept = hotel
            .room_types()
            .iter()
            .map(|room_type| *room_type.id().as_ref())
            .collect::<Vec<Uuid>>();
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM room_types
            WHERE hotel_id = $1 AND NOT (id = ANY($2))
            "#,
        )
        .bind(hotel.id().as_ref())
        .bind(&kept)
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::write_room_types(con, hotel).await
    }

    async fn write_room_types(
        con: &mut PgConnection,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError> {
        for (position, room_type) in hotel.room_types().iter().enumerate() {
            sqlx::query(
                // language=postgresql
                r#"
                INSERT INTO room_types (id, hotel_id, position, name, price, bed_type, breakfast,
                                        cancel_policy, max_guests, inventory)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (id) DO UPDATE
                SET position = excluded.position, name = excluded.name, price = excluded.price,
                    bed_type = excluded.bed_type, breakfast = excluded.breakfast,
                    cancel_policy = excluded.cancel_policy, max_guests = excluded.max_guests,
                    inventory = excluded.inventory
                "#,
            )
            .bind(room_type.id().as_ref())
            .bind(hotel.id().as_ref())
            .bind(position as i32)
            .bind(room_type.name().as_ref())
            .bind(room_type.price().as_ref())
            .bind(room_type.bed_type().as_ref())
            .bind(room_type.breakfast().as_ref())
            .bind(room_type.cancel_policy().as_str())
            .bind(room_type.max_guests().as_ref())
            .bind(room_type.inventory().as_ref())
            .execute(&mut *con)
            .await
            .convert_error()?;
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, hotel_id: &HotelId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM hotels
            WHERE id = $1
            "#,
        )
        .bind(hotel_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn try_reserve(
        con: &mut PgConnection,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE room_types
            SET inventory = inventory - $3
            WHERE id = $2 AND hotel_id = $1 AND inventory >= $3
            "#,
        )
        .bind(hotel_id.as_ref())
        .bind(room_type_id.as_ref())
        .bind(count.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }

    async fn release(
        con: &mut PgConnection,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE room_types
            SET inventory = inventory + $3
            WHERE id = $2 AND hotel_id = $1
            "#,
        )
        .bind(hotel_id.as_ref())
        .bind(room_type_id.as_ref())
        .bind(count.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

fn image_urls(hotel: &Hotel) -> Vec<String> {
    hotel
        .images()
        .iter()
        .map(|image| image.as_ref().clone())
        .collect()
}
