use smarttrip_core::{
    AddOutcome, Attraction, AttractionId, Catalog, Category, FacetSelection, FacetToggle,
    FormError, NewAttractionForm, PlannerError, TransportMode, TripPlanner,
};

fn spot(id: &str, region: &str, district: &str, name: &str) -> Attraction {
    Attraction {
        id: AttractionId::new(id),
        region: region.to_string(),
        district: district.to_string(),
        name: name.to_string(),
        category: Category::Restaurant,
        description: format!("{name} 介紹"),
        suggested_duration: "1 小時".to_string(),
        address: format!("{region}{district}"),
        rating: 4.0,
        popularity: 60.0,
        lat: Some(25.0),
        lng: Some(121.5),
    }
}

fn planner() -> TripPlanner {
    TripPlanner::with_catalog(Catalog::new(
        "2024-05-01T00:00:00Z",
        vec![
            spot("1", "台北", "信義", "鼎泰豐"),
            spot("2", "台中", "西區", "宮原眼科"),
            spot("3", "台北", "中山", "晴光市場"),
            spot("4", "高雄", "鹽埕", "港園牛肉麵"),
        ],
    ))
}

fn region(label: &str) -> FacetToggle {
    FacetToggle::from_label(label)
}

fn visible_ids(planner: &TripPlanner) -> Vec<String> {
    planner.visible().iter().map(|a| a.id.to_string()).collect()
}

#[test]
fn region_filter_then_all_resets_every_facet() {
    let mut planner = planner();
    planner.toggle_region(&region("台北"));
    planner.toggle_district(&region("信義"));
    planner.apply_filters();
    assert_eq!(visible_ids(&planner), ["1"]);

    planner.toggle_region(&region("全部"));
    assert_eq!(planner.pending().regions, FacetSelection::All);
    assert_eq!(planner.pending().districts, FacetSelection::All);

    planner.apply_filters();
    assert_eq!(visible_ids(&planner), ["1", "2", "3", "4"]);
}

#[test]
fn selecting_another_region_resets_pending_districts() {
    let mut planner = planner();
    planner.toggle_region(&region("台北"));
    planner.toggle_district(&region("中山"));
    planner.toggle_region(&region("高雄"));

    assert_eq!(planner.pending().regions.values(), ["台北", "高雄"]);
    assert_eq!(planner.pending().districts, FacetSelection::All);
    assert_eq!(planner.available_districts(), ["信義", "中山", "鹽埕"]);
}

#[test]
fn deselecting_last_region_reverts_to_all() {
    let mut planner = planner();
    planner.toggle_region(&region("台中"));
    planner.toggle_region(&region("台中"));
    assert_eq!(planner.pending().regions, FacetSelection::All);
}

#[test]
fn filter_commit_moves_selection_to_first_visible() {
    let mut planner = planner();
    planner.select(&AttractionId::new("2")).unwrap();

    planner.toggle_region(&region("台北"));
    planner.apply_filters();

    assert_eq!(planner.selected_id(), Some(&AttractionId::new("1")));
}

#[test]
fn search_and_trip_settings_commit_together() {
    let mut planner = planner();
    planner.set_pending_search("市場");
    planner.set_pending_transport(TransportMode::Bicycle);
    planner.set_pending_travel_days(2).unwrap();
    planner.apply_filters();

    assert_eq!(visible_ids(&planner), ["3"]);
    assert_eq!(planner.applied().transport_mode, TransportMode::Bicycle);
    assert_eq!(planner.applied().travel_days, 2);
}

#[test]
fn itinerary_add_is_deduplicated_and_remove_is_tolerant() {
    let mut planner = planner();

    assert_eq!(planner.add_selected_to_itinerary().unwrap(), AddOutcome::Added);
    assert_eq!(
        planner.add_to_itinerary(&AttractionId::new("1")).unwrap(),
        AddOutcome::AlreadyPresent
    );
    assert_eq!(
        planner.add_to_itinerary(&AttractionId::new("4")).unwrap(),
        AddOutcome::Added
    );
    assert_eq!(planner.itinerary().len(), 2);

    assert!(!planner.remove_from_itinerary(&AttractionId::new("99")));
    assert_eq!(planner.itinerary().len(), 2);
    assert!(planner.remove_from_itinerary(&AttractionId::new("1")));
    assert_eq!(planner.itinerary().entries()[0].id, AttractionId::new("4"));
}

#[test]
fn itinerary_rejects_unknown_attraction() {
    let mut planner = planner();
    let err = planner
        .add_to_itinerary(&AttractionId::new("missing"))
        .unwrap_err();
    assert_eq!(err, PlannerError::UnknownAttraction(AttractionId::new("missing")));
}

#[test]
fn itinerary_can_hold_attractions_hidden_by_filters() {
    let mut planner = planner();
    planner.add_to_itinerary(&AttractionId::new("2")).unwrap();
    planner.toggle_region(&region("高雄"));
    planner.apply_filters();

    assert_eq!(visible_ids(&planner), ["4"]);
    assert_eq!(planner.itinerary().len(), 1);
}

#[test]
fn export_uses_applied_transport_mode() {
    let mut planner = planner();
    assert!(planner.export_plan().is_none());

    planner.add_to_itinerary(&AttractionId::new("1")).unwrap();
    planner.add_to_itinerary(&AttractionId::new("3")).unwrap();
    planner.set_pending_transport(TransportMode::Walking);
    assert_eq!(planner.estimated_travel_minutes(), 12);

    planner.apply_filters();
    assert_eq!(planner.estimated_travel_minutes(), 96);
    let text = planner.export_plan().unwrap();
    assert!(text.contains("交通方式：走路"));
    assert!(text.contains("第 2 站：晴光市場"));
}

#[test]
fn manual_attraction_is_prepended_visible_and_selected() {
    let mut planner = planner();
    planner.set_pending_search("鼎泰豐");
    planner.set_pending_transport(TransportMode::Scooter);
    planner.apply_filters();
    assert_eq!(visible_ids(&planner), ["1"]);

    let id = planner
        .add_manual_attraction(NewAttractionForm {
            name: "自訂景點".to_string(),
            region: "花蓮".to_string(),
            district: "秀林".to_string(),
            category: Category::Scenic,
            description: "峽谷步道".to_string(),
            address: "花蓮縣秀林鄉".to_string(),
            ..NewAttractionForm::default()
        })
        .unwrap();

    assert_eq!(planner.catalog().attractions[0].id, id);
    assert_eq!(planner.catalog().len(), 5);
    assert_eq!(planner.selected_id(), Some(&id));
    assert_eq!(planner.visible().len(), 5);
    assert!(planner.applied().search_term.is_empty());
    assert!(planner.pending().search_term.is_empty());
    assert_eq!(planner.applied().transport_mode, TransportMode::Scooter);
    assert_eq!(planner.available_regions()[0], "花蓮");

    let created = planner.selected().unwrap();
    assert_eq!(created.rating, 5.0);
    assert_eq!(created.popularity, 50.0);
    assert!(created.coordinates().is_some());
}

#[test]
fn incomplete_manual_form_leaves_state_untouched() {
    let mut planner = planner();
    let before = planner.catalog().clone();

    let err = planner
        .add_manual_attraction(NewAttractionForm {
            name: "半套".to_string(),
            ..NewAttractionForm::default()
        })
        .unwrap_err();

    assert_eq!(err, PlannerError::Form(FormError::MissingField("region")));
    assert_eq!(planner.catalog(), &before);
    assert_eq!(planner.selected_id(), Some(&AttractionId::new("1")));
}

#[test]
fn manual_attraction_keeps_coordinates_as_entered() {
    let mut planner = planner();
    let id = planner
        .add_manual_attraction(NewAttractionForm {
            name: "反轉座標".to_string(),
            region: "台北".to_string(),
            district: "士林".to_string(),
            category: Category::Scenic,
            description: "經緯度對調".to_string(),
            address: "台北市士林區".to_string(),
            lat: Some(121.5),
            lng: Some(25.0),
            ..NewAttractionForm::default()
        })
        .unwrap();

    let created = planner.catalog().get(&id).unwrap();
    assert_eq!(created.lat, Some(121.5));
    assert_eq!(created.lng, Some(25.0));
}
