use super::*;

#[test]
fn department_parses_case_insensitively() {
    assert_eq!("Men".parse::<Department>().unwrap(), Department::Men);
    assert_eq!(" WOMEN ".parse::<Department>().unwrap(), Department::Women);
    assert_eq!("kids".parse::<Department>().unwrap(), Department::Kids);
}

#[test]
fn department_rejects_unknown_names() {
    let err = "pets".parse::<Department>().unwrap_err();
    assert_eq!(err, UnknownDepartment("pets".into()));
    assert!(err.to_string().contains("pets"));
}

#[test]
fn tab_order_starts_with_men() {
    assert_eq!(Department::ALL[0], Department::Men);
    assert_eq!(Department::ALL.map(Department::label), ["Men", "Women", "Kids"]);
}

#[test]
fn every_department_has_three_titled_groups() {
    for department in Department::ALL {
        let tab = menu(department);
        assert_eq!(tab.department, department);
        let titles = tab.groups.map(|g| g.title);
        assert_eq!(titles, ["Clothing", "Shoes", "Accessories"]);
        assert!(tab.groups.iter().all(|g| !g.items.is_empty()));
    }
}

#[test]
fn hrefs_live_under_the_department_path() {
    for department in Department::ALL {
        let prefix = format!("/products/{}/", department.label().to_ascii_lowercase());
        for group in &menu(department).groups {
            for entry in group.items {
                assert!(entry.href.starts_with(&prefix), "{} not under {prefix}", entry.href);
            }
        }
    }
}

#[test]
fn featured_lists_highlighted_items_in_order() {
    let names: Vec<_> = featured(Department::Women).map(|entry| entry.name).collect();
    assert_eq!(names, ["Tops", "Jeans", "Heels", "Flats", "Handbags"]);
}

#[test]
fn kids_shoes_has_two_items() {
    let shoes = &menu(Department::Kids).groups[1];
    assert_eq!(shoes.items.len(), 2);
    assert_eq!(shoes.items[1].href, "/products/kids/sports-shoes");
}
