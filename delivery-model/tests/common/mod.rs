//! Shared fixtures for model tests.

#![allow(dead_code)]

use delivery_link::{LinkListSlot, LinkSlot};
use delivery_model::{Asset, DecodeContext, EntryDecodable, FieldsDecoder};
use delivery_types::{DecodeResult, Locale, LocalizationContext, Resource, Sys};
use serde_json::{Value, json};

/// A caller-defined content type with link fields of every kind.
#[derive(Debug)]
pub struct Cat {
    sys: Sys,
    pub name: String,
    pub lives: i64,
    pub likes: Vec<String>,
    pub best_friend: LinkSlot<Cat>,
    pub image: LinkSlot<Asset>,
    pub friends: LinkListSlot<Cat>,
}

impl Resource for Cat {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

impl EntryDecodable for Cat {
    const CONTENT_TYPE_ID: &'static str = "cat";

    fn decode(
        sys: Sys,
        fields: &FieldsDecoder<'_>,
        ctx: &mut DecodeContext<'_>,
    ) -> DecodeResult<Self> {
        let best_friend = LinkSlot::new();
        fields.resolve_link("bestFriend", ctx.resolver(), best_friend.callback())?;
        let image = LinkSlot::new();
        fields.resolve_link("image", ctx.resolver(), image.callback())?;
        let friends = LinkListSlot::new();
        fields.resolve_links("friends", ctx.resolver(), friends.callback())?;

        Ok(Self {
            name: fields.decode("name")?,
            lives: fields.decode_optional("lives")?.unwrap_or(9),
            likes: fields.decode_optional("likes")?.unwrap_or_default(),
            best_friend,
            image,
            friends,
            sys,
        })
    }
}

pub fn localization() -> LocalizationContext {
    LocalizationContext::new(vec![
        Locale::new("en-US").as_default(),
        Locale::new("de-DE").with_fallback("en-US"),
        Locale::new("tlh"),
    ])
    .expect("valid locales")
}

fn sys_json(resource_type: &str, id: &str, content_type: Option<&str>, locale: Option<&str>) -> Value {
    let mut sys = json!({
        "id": id,
        "type": resource_type,
        "createdAt": "2014-02-21T13:42:45.926Z",
        "updatedAt": "2014-04-28T11:30:02.103Z",
        "revision": 2
    });
    if let Some(content_type) = content_type {
        sys["contentType"] = json!({"sys": {"type": "Link", "linkType": "ContentType", "id": content_type}});
    }
    if let Some(locale) = locale {
        sys["locale"] = json!(locale);
    }
    sys
}

/// A single-locale (`en-US`) entry.
pub fn entry_json(id: &str, content_type: &str, fields: Value) -> Value {
    json!({"sys": sys_json("Entry", id, Some(content_type), Some("en-US")), "fields": fields})
}

/// A multi-locale entry: `fields` values are keyed by locale code.
pub fn localized_entry_json(id: &str, content_type: &str, fields: Value) -> Value {
    json!({"sys": sys_json("Entry", id, Some(content_type), None), "fields": fields})
}

pub fn asset_json(id: &str, title: &str) -> Value {
    json!({
        "sys": sys_json("Asset", id, None, Some("en-US")),
        "fields": {
            "title": title,
            "file": {
                "url": format!("//images.example.net/{id}.png"),
                "fileName": format!("{id}.png"),
                "contentType": "image/png",
                "details": {"size": 2048, "image": {"width": 250, "height": 250}}
            }
        }
    })
}

pub fn entry_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Entry", "id": id}})
}

pub fn asset_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Asset", "id": id}})
}

pub fn cat_json(id: &str, name: &str, best_friend: Option<&str>) -> Value {
    let mut fields = json!({"name": name, "likes": ["rainbows", "fish"]});
    if let Some(friend) = best_friend {
        fields["bestFriend"] = entry_link(friend);
    }
    entry_json(id, "cat", fields)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("delivery_model=trace,delivery_link=debug")
        .with_test_writer()
        .try_init();
}
