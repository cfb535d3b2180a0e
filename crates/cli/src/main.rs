//! Demo transcript over the fixed sample dataset: 4 users, 4 products
//! (2 real, 2 virtual), 4 orders. Illustrative output, not a contract.

use std::sync::Arc;

use chrono::NaiveDate;

use storelens_catalog::{CodeRegistry, Product};
use storelens_insights::{
    average_buyer_age, most_expensive_product, most_popular_product, order_weights,
    product_buyers, sort_orders_by_age_desc, sort_products_by_price,
};
use storelens_sales::Order;
use storelens_users::User;

fn describe_order(order: &Order) -> String {
    let names: Vec<&str> = order.products().iter().map(|p| p.name()).collect();
    format!("{}: [{}]", order.user(), names.join(", "))
}

fn main() {
    storelens_observability::init();

    let registry = CodeRegistry::global();

    let alice = Arc::new(User::new("Alice", 19));
    let bob = Arc::new(User::new("Bob", 19));
    let charlie = Arc::new(User::new("Charlie", 20));
    let john = Arc::new(User::new("John", 20));

    let product_a = Arc::new(Product::new_real("Product A", 20.50, 10, 25));
    let product_b = Arc::new(Product::new_real("Product B", 50.0, 6, 17));
    let product_c = Arc::new(Product::new_virtual(
        "Product C",
        100.0,
        "xxx",
        NaiveDate::from_ymd_opt(2023, 5, 12).expect("valid date"),
        registry,
    ));
    let product_d = Arc::new(Product::new_virtual(
        "Product D",
        81.25,
        "yyy",
        NaiveDate::from_ymd_opt(2024, 6, 20).expect("valid date"),
        registry,
    ));

    let orders = vec![
        Order::new(
            alice,
            vec![product_a.clone(), product_c.clone(), product_d.clone()],
        ),
        Order::new(bob, vec![product_a.clone(), product_b.clone()]),
        Order::new(charlie, vec![product_a.clone(), product_d.clone()]),
        Order::new(
            john,
            vec![
                product_c.clone(),
                product_d.clone(),
                product_a.clone(),
                product_b.clone(),
            ],
        ),
    ];

    tracing::info!(orders = orders.len(), "sample dataset constructed");

    println!("1. Redemption code registry (seeded by virtual product construction)\n");
    for code in ["xxx", "yyy", "zzz"] {
        println!("Is code used ({code}): {}\n", registry.is_code_used(code));
    }

    match most_expensive_product(&orders) {
        Some(product) => println!("2. Most expensive product: {product}\n"),
        None => println!("2. Most expensive product: none\n"),
    }

    match most_popular_product(&orders) {
        Some(product) => println!("3. Most popular product: {product}\n"),
        None => println!("3. Most popular product: none\n"),
    }

    println!(
        "4. Average buyer age for {}: {}\n",
        product_b.name(),
        average_buyer_age(&product_b, &orders)
    );

    println!("5. Products and their buyers\n");
    for (product, buyers) in product_buyers(&orders) {
        let names: Vec<String> = buyers.iter().map(|user| user.to_string()).collect();
        println!("product: {product} buyers: [{}]\n", names.join(", "));
    }

    let by_price = sort_products_by_price(&[
        product_a.clone(),
        product_b.clone(),
        product_c.clone(),
        product_d.clone(),
    ]);
    println!("6. a) Products sorted by price:");
    for product in &by_price {
        println!("   {product}");
    }
    println!();

    println!("6. b) Orders sorted by user age, descending:");
    for order in sort_orders_by_age_desc(&orders) {
        println!("   {}", describe_order(&order));
    }
    println!();

    println!("7. Total shipping weight of each order\n");
    let weights = order_weights(&orders);
    for order in &orders {
        println!(
            "order: {} total weight: {}\n",
            describe_order(order),
            weights[order]
        );
    }
}
