use chrono::{Days, Local};
use crudnav::{Navigator, PathUrl, RequestParams, Validator, filtering::typed_value};

fn navigator(url: &str) -> Navigator {
    let mut n = Navigator::new(RequestParams::new(), PathUrl::parse(url).unwrap());
    n.default_conditions_mut().greater("id", 7);

    n.add_filter_equal("name")
        .set_name("Имя")
        .set_pattern("^[a-z]+$")
        .unwrap();
    n.add_filter_like("addr");
    n.add_filter_between("id")
        .set_name("ID")
        .set_validator(Validator::numeric())
        .set_greater_or_equal(false);
    n.add_filter("date", |ctx, filter| {
        if let Some(days) = filter.clean_value(ctx.params())
            && let Ok(days) = days.parse::<u64>()
            && let Some(day) = Local::now().date_naive().checked_add_days(Days::new(days))
        {
            ctx.conditions()
                .greater_or_equal("created_at", day.format("%d.%m.%Y").to_string());
        }
    })
    .set_name("Дата")
    .set_validator(Validator::numeric());

    n
}

fn resolve(url: &str) -> String {
    navigator(url).process_filters().as_sql()
}

#[test]
fn test_no_filters_keeps_default_condition() {
    assert_eq!(resolve("/hello/"), "`id` > 7");
}

#[test]
fn test_unknown_parameters_are_ignored() {
    assert_eq!(resolve("/hello/some:value/"), "`id` > 7");
}

#[test]
fn test_equal_filter() {
    assert_eq!(resolve("/hello/name:abc/"), "`id` > 7 AND `name` = 'abc'");
}

#[test]
fn test_invalid_value_dropped_and_range_on_both_sides() {
    assert_eq!(
        resolve("/hello/name:123/id_from:10/id_to:20/"),
        "`id` > 7 AND `id` > 10 AND `id` <= 20"
    );
}

#[test]
fn test_range_on_one_side() {
    assert_eq!(
        resolve("/hello/id_from:abc/id_to:10/"),
        "`id` > 7 AND `id` <= 10"
    );
}

#[test]
fn test_custom_callback_filter() {
    let tomorrow = Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap()
        .format("%d.%m.%Y")
        .to_string();

    assert_eq!(
        resolve("/hello/date:1/"),
        format!("`id` > 7 AND `created_at` >= '{tomorrow}'")
    );
    assert_eq!(resolve("/hello/date:soon/"), "`id` > 7");
}

#[test]
fn test_like_filter() {
    assert_eq!(
        resolve("/hello/addr:%D0%BF%D1%80%D0%B8/"),
        "`id` > 7 AND `addr` LIKE 'при%'"
    );
}

#[test]
fn test_filters_resolve_in_registration_order() {
    assert_eq!(
        resolve("/hello/addr:main/name:abc/"),
        "`id` > 7 AND `name` = 'abc' AND `addr` LIKE 'main%'"
    );
}

#[test]
fn test_query_string_parameters_are_read() {
    let request = RequestParams::from_urlencoded("name=abc&id_to=12");
    let mut n = Navigator::new(request, PathUrl::parse("/hello/").unwrap());
    n.add_filter_equal("name");
    n.add_filter_between("id").set_validator(Validator::numeric());

    assert_eq!(n.process_filters().as_sql(), "`name` = 'abc' AND `id` <= 12");
    assert_eq!(n.url_clean().as_string(), "/hello/id_to:12/name:abc/");
}

#[test]
fn test_callback_overrides_between() {
    let mut n = Navigator::new(
        RequestParams::new(),
        PathUrl::parse("/hello/age_from:18/").unwrap(),
    );
    n.add_filter_between("age");
    assert_eq!(n.process_filters().as_sql(), "`age` >= 18");

    n.filter_mut("age").unwrap().set_callback(|ctx, filter| {
        if let Some(value) = filter.clean_value_from(ctx.params()) {
            ctx.conditions().equal("two", typed_value(&value));
        }
    });
    assert_eq!(n.process_filters().as_sql(), "`two` = 18");
}

#[test]
fn test_callback_overrides_like() {
    let mut n = Navigator::new(
        RequestParams::new(),
        PathUrl::parse("/hello/name:%D0%BE%D0%BB%D0%BE%D0%BB%D0%BE/").unwrap(),
    );
    n.add_filter_like("name");
    assert_eq!(n.process_filters().as_sql(), "`name` LIKE 'ололо%'");

    n.filter_mut("name").unwrap().set_callback(|ctx, _| {
        ctx.conditions().like("name", "пыщпыщ%");
    });
    assert_eq!(n.process_filters().as_sql(), "`name` LIKE 'пыщпыщ%'");
}

#[test]
fn test_date_range() {
    let mut n = Navigator::new(
        RequestParams::new(),
        PathUrl::parse("/hello/date_from:18.01.2014/date_to:20.01.2014/").unwrap(),
    );
    n.add_filter_between("date");
    assert_eq!(
        n.process_filters().as_sql(),
        "`date` >= '18.01.2014' AND `date` <= '20.01.2014'"
    );

    n.filter_mut("date").unwrap().set_date(true);
    assert_eq!(
        n.process_filters().as_sql(),
        "`date` >= '2014-01-18 00:00:00' AND `date` <= '2014-01-20 23:59:59'"
    );
}
