//! Tests for derived flags, displayed source, selection and the toolbar snapshot.

use super::{Fixture, NODE_POSITION, REMOTE_SRC, uploaded};
use crate::model::{AspectRatio, ImageAttributes};
use crate::view::NaturalSize;

const PREVIEW_SRC: &str = "blob:local-preview-1";

#[test]
fn test_loader_until_first_load_completes() {
    let fixture = Fixture::new(uploaded());
    let view = fixture.mount();

    let flags = view.visibility(true);
    assert!(flags.loader);
    assert!(!flags.toolbar);
    assert!(!flags.resize_handle);

    view.on_image_load(NaturalSize::new(400, 200));

    let flags = view.visibility(true);
    assert!(!flags.loader);
    assert!(flags.toolbar);
    assert!(flags.resize_handle);
    assert!(flags.selection_highlight);
    assert!(!view.visibility(false).selection_highlight);
}

#[test]
fn test_local_preview_before_upload() {
    let fixture = Fixture::new(ImageAttributes::new(None));
    let view = fixture.mount();
    assert_eq!(view.displayed_source(), None);
    assert!(view.visibility(false).loader);

    view.set_local_preview(Some(PREVIEW_SRC.to_string()));
    view.on_image_load(NaturalSize::new(400, 200));

    assert_eq!(view.displayed_source().as_deref(), Some(PREVIEW_SRC));
    let flags = view.visibility(true);
    assert!(!flags.loader);
    assert!(!flags.toolbar);
    assert!(!flags.resize_handle);
    assert!(!flags.selection_highlight);

    // Upload finished
    fixture.store.borrow_mut().set_src(Some(REMOTE_SRC.to_string()));
    view.on_attributes_changed();

    assert_eq!(view.displayed_source().as_deref(), Some(REMOTE_SRC));
    let flags = view.visibility(true);
    assert!(flags.toolbar);
    assert!(flags.selection_highlight);
}

#[test]
fn test_click_selects_node() {
    let fixture = Fixture::new(uploaded());
    let view = fixture.mount();

    view.on_click();
    assert_eq!(fixture.store.borrow().selection(), Some(NODE_POSITION));
}

#[test]
fn test_click_on_removed_node_is_contained() {
    let fixture = Fixture::new(uploaded());
    let view = fixture.mount();
    fixture.store.borrow_mut().detach();

    view.on_click();
    assert_eq!(fixture.store.borrow().selection(), None);
}

#[test]
fn test_toolbar_snapshot() {
    let fixture = Fixture::new(uploaded());
    let view = fixture.mount();
    view.on_image_load(NaturalSize::new(400, 200));

    let snapshot = view.toolbar_snapshot();
    assert_eq!(snapshot.src.as_deref(), Some(REMOTE_SRC));
    assert_eq!(snapshot.aspect_ratio, AspectRatio::new(2.0));
    assert_eq!(snapshot.width, "350px");
    assert_eq!(snapshot.height, "175px");

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["aspectRatio"], 2.0);
    assert_eq!(json["width"], "350px");
}
