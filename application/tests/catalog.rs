mod common;

use application::service::{
    CreateHotelService, CreateOrderService, GetCatalogMetaService, GetHotelBannersService,
    GetPublishedHotelService, SearchHotelsService,
};
use application::transfer::{HotelDto, HotelSummaryDto, SearchHotelsDto};
use kernel::prelude::entity::Paged;
use kernel::KernelError;

use crate::common::{
    assert_error, book, booking, hotel, merchant, publish, room, set_status, Module,
};

struct Catalog {
    module: Module,
    jade: HotelDto,
    harbor: HotelDto,
    pine: HotelDto,
    pending: HotelDto,
}

/// Three published hotels and one still waiting for review.
async fn catalog() -> error_stack::Result<Catalog, KernelError> {
    let module = Module::new();
    let owner = merchant();

    let mut dto = hotel(
        "Jade",
        "Shanghai",
        5,
        vec![room("Suite", 1200, "free", 2), room("Deluxe", 800, "free", 5)],
    );
    dto.tags = vec!["wifi".to_string(), "spa".to_string()];
    let jade = publish(&module, &owner, dto).await?;

    let mut dto = hotel("Harbor", "Shanghai", 4, vec![room("Sea View", 300, "free", 5)]);
    dto.featured = Some(true);
    let harbor = publish(&module, &owner, dto).await?;

    let pine = publish(
        &module,
        &owner,
        hotel("Pine", "Beijing", 3, vec![room("Queen", 200, "free", 5)]),
    )
    .await?;

    let mut dto = hotel("Hidden", "Shanghai", 5, vec![room("King", 50, "free", 5)]);
    dto.featured = Some(true);
    let pending = module.create_hotel(&owner, dto).await?;

    Ok(Catalog {
        module,
        jade,
        harbor,
        pine,
        pending,
    })
}

fn names(page: &Paged<HotelSummaryDto>) -> Vec<&str> {
    page.items.iter().map(|hotel| hotel.name.as_str()).collect()
}

#[tokio::test]
async fn search_sorts_published_hotels() -> error_stack::Result<(), KernelError> {
    let catalog = catalog().await?;
    let module = &catalog.module;

    let page = module.search_hotels(SearchHotelsDto::default()).await?;
    assert_eq!(page.total, 3);
    assert_eq!(names(&page), vec!["Harbor", "Jade", "Pine"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            sort: Some("priceAsc".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Pine", "Harbor", "Jade"]);
    assert_eq!(page.items[2].min_price, 800);

    let page = module
        .search_hotels(SearchHotelsDto {
            sort: Some("priceDesc".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Jade", "Harbor", "Pine"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            sort: Some("nonsense".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Harbor", "Jade", "Pine"]);
    Ok(())
}

#[tokio::test]
async fn search_filters_and_paginates() -> error_stack::Result<(), KernelError> {
    let catalog = catalog().await?;
    let module = &catalog.module;

    let page = module
        .search_hotels(SearchHotelsDto {
            city: Some("Shanghai".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Harbor", "Jade"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            tags: Some("spa, wifi".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Jade"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            keyword: Some("HARBOR".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Harbor"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            star: Some(3),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(&page), vec!["Pine"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            page: Some(2),
            page_size: Some(2),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(names(&page), vec!["Pine"]);

    let page = module
        .search_hotels(SearchHotelsDto {
            page: Some(9),
            ..Default::default()
        })
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total, 3);
    Ok(())
}

#[tokio::test]
async fn meta_and_banners_cover_published_hotels() -> error_stack::Result<(), KernelError> {
    let catalog = catalog().await?;
    let module = &catalog.module;

    let meta = module.get_catalog_meta().await?;
    assert_eq!(meta.cities, vec!["Beijing", "Shanghai"]);
    assert_eq!(meta.tags, vec!["spa", "wifi"]);
    assert_eq!(meta.star_ratings, vec![3, 4, 5]);
    assert_eq!(meta.min_price, 200);
    assert_eq!(meta.max_price, 1200);

    let banners = module.get_hotel_banners(None).await?;
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].hotel_id, catalog.harbor.id);
    assert_eq!(banners[0].min_price, 300);
    assert!(banners[0].image_url.ends_with("Harbor.jpg"));
    Ok(())
}

#[tokio::test]
async fn empty_catalog_has_default_price_range() -> error_stack::Result<(), KernelError> {
    let module = Module::new();
    let meta = module.get_catalog_meta().await?;
    assert!(meta.cities.is_empty());
    assert_eq!((meta.min_price, meta.max_price), (0, 2000));
    assert!(module.get_hotel_banners(Some(3)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn detail_lists_room_types_cheapest_first() -> error_stack::Result<(), KernelError> {
    let catalog = catalog().await?;
    let module = &catalog.module;

    let detail = module.get_published_hotel(catalog.jade.id).await?;
    let prices = detail
        .room_types
        .iter()
        .map(|room_type| room_type.price)
        .collect::<Vec<_>>();
    assert_eq!(prices, vec![800, 1200]);
    assert_eq!(detail.min_price, 800);

    assert!(module.get_published_hotel(catalog.pine.id).await.is_ok());
    let err = module
        .get_published_hotel(catalog.pending.id)
        .await
        .unwrap_err();
    assert_error(&err, KernelError::NotFound, "Hotel not found");
    Ok(())
}

#[tokio::test]
async fn withdrawn_hotels_leave_the_catalog() -> error_stack::Result<(), KernelError> {
    let catalog = catalog().await?;
    let module = &catalog.module;

    let harbor = set_status(module, catalog.harbor.id, "offline", None).await?;
    let err = set_status(module, catalog.jade.id, "rejected", Some(" "))
        .await
        .unwrap_err();
    assert_error(
        &err,
        KernelError::Validation,
        "Reason is required for rejected status",
    );
    let jade = set_status(module, catalog.jade.id, "rejected", Some("Blurry photos")).await?;

    let page = module.search_hotels(SearchHotelsDto::default()).await?;
    assert_eq!(page.total, 1);
    assert_eq!(names(&page), vec!["Pine"]);

    let meta = module.get_catalog_meta().await?;
    assert_eq!(meta.cities, vec!["Beijing"]);
    assert_eq!((meta.min_price, meta.max_price), (200, 200));
    assert!(module.get_hotel_banners(None).await?.is_empty());

    for withdrawn in [&harbor, &jade] {
        let err = module.get_published_hotel(withdrawn.id).await.unwrap_err();
        assert_error(&err, KernelError::NotFound, "Hotel not found");
        let err = book(module, withdrawn, 1).await.unwrap_err();
        assert_error(&err, KernelError::NotFound, "Hotel not found or not available");
    }

    let harbor = set_status(module, harbor.id, "approved", None).await?;
    assert_eq!(module.get_published_hotel(harbor.id).await?.id, harbor.id);
    assert!(module.create_order(booking(&harbor, 1)).await.is_ok());
    Ok(())
}
