use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use storelens_catalog::{Product, ProductId};
use storelens_sales::Order;
use storelens_users::User;

/// The product with the highest price across all orders.
///
/// Products are compared in flatten order (order-list order, then product
/// order within each order); on an exact price tie the first one seen wins.
/// `None` when no order contains any product. Prices are assumed finite.
pub fn most_expensive_product(orders: &[Order]) -> Option<Arc<Product>> {
    let mut best: Option<&Arc<Product>> = None;
    for product in orders.iter().flat_map(|order| order.products()) {
        match best {
            Some(current) if product.price() <= current.price() => {}
            _ => best = Some(product),
        }
    }
    best.cloned()
}

/// The product occurring most often across all orders' product lists.
///
/// Occurrences are counted by identity, so the same instance appearing in
/// several orders (or twice in one order) accumulates. Ties break
/// deterministically: the product first seen in flatten order wins. `None`
/// when no products exist anywhere.
pub fn most_popular_product(orders: &[Order]) -> Option<Arc<Product>> {
    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    let mut first_seen: Vec<Arc<Product>> = Vec::new();
    for product in orders.iter().flat_map(|order| order.products()) {
        let count = counts.entry(product.id_typed()).or_insert(0);
        if *count == 0 {
            first_seen.push(product.clone());
        }
        *count += 1;
    }

    let mut best: Option<&Arc<Product>> = None;
    for product in &first_seen {
        let count = counts[&product.id_typed()];
        match best {
            Some(current) if count <= counts[&current.id_typed()] => {}
            _ => best = Some(product),
        }
    }
    best.cloned()
}

/// Arithmetic mean of the ages of users whose order contains `product`.
///
/// One contribution per matching order, however many times the product
/// appears inside it. Exactly `0.0` when no order matches; that is the
/// designed default, not an error.
pub fn average_buyer_age(product: &Product, orders: &[Order]) -> f64 {
    let ages: Vec<u32> = orders
        .iter()
        .filter(|order| order.contains(product))
        .map(|order| order.user().age())
        .collect();
    if ages.is_empty() {
        return 0.0;
    }
    ages.iter().map(|&age| f64::from(age)).sum::<f64>() / ages.len() as f64
}

/// For every distinct product in any order, the users whose orders contain it.
///
/// Buyers appear in order-list order, one entry per matching order, so a user
/// with several matching orders is listed once per order. Distinctness is
/// identity-based.
pub fn product_buyers(orders: &[Order]) -> HashMap<Arc<Product>, Vec<Arc<User>>> {
    let mut distinct: Vec<Arc<Product>> = Vec::new();
    for product in orders.iter().flat_map(|order| order.products()) {
        if !distinct.contains(product) {
            distinct.push(product.clone());
        }
    }

    distinct
        .into_iter()
        .map(|product| {
            let buyers = orders
                .iter()
                .filter(|order| order.contains(&product))
                .map(|order| order.user().clone())
                .collect();
            (product, buyers)
        })
        .collect()
}

/// Stable ascending sort by price. Does not mutate the input.
pub fn sort_products_by_price(products: &[Arc<Product>]) -> Vec<Arc<Product>> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| a.price().partial_cmp(&b.price()).unwrap_or(Ordering::Equal));
    sorted
}

/// Stable sort by the order's user age, oldest first. Does not mutate the input.
pub fn sort_orders_by_age_desc(orders: &[Order]) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.user().age().cmp(&a.user().age()));
    sorted
}

/// Total shipping weight of each order.
///
/// Real products contribute their weight; virtual products contribute 0, so
/// a virtual-only (or empty) order totals 0.
pub fn order_weights(orders: &[Order]) -> HashMap<Order, u32> {
    orders
        .iter()
        .map(|order| {
            let total = order
                .products()
                .iter()
                .map(|product| product.shipping_weight())
                .sum();
            (order.clone(), total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storelens_catalog::CodeRegistry;

    struct Fixture {
        product_a: Arc<Product>,
        product_b: Arc<Product>,
        product_c: Arc<Product>,
        product_d: Arc<Product>,
        alice: Arc<User>,
        bob: Arc<User>,
        charlie: Arc<User>,
        john: Arc<User>,
        orders: Vec<Order>,
    }

    /// The hand-built dataset: A/B real (weights 10 and 6), C/D virtual.
    fn fixture() -> Fixture {
        let registry = CodeRegistry::new();
        let product_a = Arc::new(Product::new_real("Product A", 20.50, 10, 10));
        let product_b = Arc::new(Product::new_real("Product B", 50.0, 6, 6));
        let product_c = Arc::new(Product::new_virtual(
            "Product C",
            100.0,
            "xxx",
            NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            &registry,
        ));
        let product_d = Arc::new(Product::new_virtual(
            "Product D",
            81.25,
            "yyy",
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            &registry,
        ));

        let alice = Arc::new(User::new("Alice", 19));
        let bob = Arc::new(User::new("Bob", 19));
        let charlie = Arc::new(User::new("Charlie", 20));
        let john = Arc::new(User::new("John", 20));

        let orders = vec![
            Order::new(
                alice.clone(),
                vec![product_a.clone(), product_c.clone(), product_d.clone()],
            ),
            Order::new(bob.clone(), vec![product_a.clone(), product_b.clone()]),
            Order::new(charlie.clone(), vec![product_a.clone(), product_d.clone()]),
            Order::new(
                john.clone(),
                vec![
                    product_c.clone(),
                    product_d.clone(),
                    product_a.clone(),
                    product_b.clone(),
                ],
            ),
        ];

        Fixture {
            product_a,
            product_b,
            product_c,
            product_d,
            alice,
            bob,
            charlie,
            john,
            orders,
        }
    }

    fn productless_orders() -> Vec<Order> {
        vec![
            Order::new(Arc::new(User::new("Alice", 19)), Vec::new()),
            Order::new(Arc::new(User::new("Bob", 19)), Vec::new()),
        ]
    }

    #[test]
    fn most_expensive_product_picks_the_highest_price() {
        let fx = fixture();
        let found = most_expensive_product(&fx.orders).unwrap();
        assert_eq!(found, fx.product_c);
    }

    #[test]
    fn most_expensive_product_is_none_without_products() {
        assert!(most_expensive_product(&[]).is_none());
        assert!(most_expensive_product(&productless_orders()).is_none());
    }

    #[test]
    fn most_expensive_product_breaks_ties_by_first_seen() {
        let first = Arc::new(Product::new_real("First", 50.0, 1, 1));
        let second = Arc::new(Product::new_real("Second", 50.0, 1, 1));
        let orders = vec![Order::new(
            Arc::new(User::new("Alice", 19)),
            vec![first.clone(), second.clone()],
        )];

        assert_eq!(most_expensive_product(&orders).unwrap(), first);
    }

    #[test]
    fn most_popular_product_counts_occurrences_across_orders() {
        let fx = fixture();
        // A appears in all four orders; D in three; B and C in two each.
        let found = most_popular_product(&fx.orders).unwrap();
        assert_eq!(found, fx.product_a);
    }

    #[test]
    fn most_popular_product_is_none_without_products() {
        assert!(most_popular_product(&[]).is_none());
        assert!(most_popular_product(&productless_orders()).is_none());
    }

    #[test]
    fn most_popular_product_breaks_ties_by_first_seen() {
        let first = Arc::new(Product::new_real("First", 1.0, 1, 1));
        let second = Arc::new(Product::new_real("Second", 2.0, 1, 1));
        let user = Arc::new(User::new("Alice", 19));
        let orders = vec![
            Order::new(user.clone(), vec![first.clone(), second.clone()]),
            Order::new(user.clone(), vec![second.clone(), first.clone()]),
        ];

        assert_eq!(most_popular_product(&orders).unwrap(), first);
    }

    #[test]
    fn most_popular_product_counts_duplicates_within_one_order() {
        let rare = Arc::new(Product::new_real("Rare", 1.0, 1, 1));
        let repeated = Arc::new(Product::new_real("Repeated", 2.0, 1, 1));
        let orders = vec![Order::new(
            Arc::new(User::new("Alice", 19)),
            vec![rare.clone(), repeated.clone(), repeated.clone()],
        )];

        assert_eq!(most_popular_product(&orders).unwrap(), repeated);
    }

    #[test]
    fn average_buyer_age_is_the_mean_over_matching_orders() {
        let fx = fixture();
        // Product B is in Bob's (19) and John's (20) orders.
        let average = average_buyer_age(&fx.product_b, &fx.orders);
        assert!((average - 19.5).abs() < f64::EPSILON);
    }

    #[test]
    fn average_buyer_age_defaults_to_zero_without_matches() {
        let fx = fixture();
        let unsold = Product::new_real("Unsold", 5.0, 1, 1);
        assert_eq!(average_buyer_age(&unsold, &fx.orders), 0.0);
        assert_eq!(average_buyer_age(&fx.product_a, &[]), 0.0);
    }

    #[test]
    fn product_buyers_lists_users_in_order_list_order() {
        let fx = fixture();
        let map = product_buyers(&fx.orders);

        assert_eq!(map.len(), 4);
        assert_eq!(
            map[&fx.product_a],
            vec![fx.alice.clone(), fx.bob.clone(), fx.charlie.clone(), fx.john.clone()]
        );
        assert_eq!(map[&fx.product_b], vec![fx.bob.clone(), fx.john.clone()]);
        assert_eq!(map[&fx.product_c], vec![fx.alice.clone(), fx.john.clone()]);
    }

    #[test]
    fn product_buyers_repeats_a_user_with_several_matching_orders() {
        let product = Arc::new(Product::new_real("Product A", 20.50, 10, 10));
        let alice = Arc::new(User::new("Alice", 19));
        let orders = vec![
            Order::new(alice.clone(), vec![product.clone()]),
            Order::new(alice.clone(), vec![product.clone()]),
        ];

        let map = product_buyers(&orders);
        assert_eq!(map[&product], vec![alice.clone(), alice.clone()]);
    }

    #[test]
    fn product_buyers_of_empty_orders_is_empty() {
        assert!(product_buyers(&productless_orders()).is_empty());
    }

    #[test]
    fn sort_products_by_price_is_ascending_and_leaves_input_alone() {
        let fx = fixture();
        let products = vec![
            fx.product_a.clone(),
            fx.product_b.clone(),
            fx.product_c.clone(),
            fx.product_d.clone(),
        ];

        let sorted = sort_products_by_price(&products);

        let expected = vec![
            fx.product_a.clone(),
            fx.product_b.clone(),
            fx.product_d.clone(),
            fx.product_c.clone(),
        ];
        assert_eq!(sorted, expected);
        // Input order untouched.
        assert_eq!(products[1], fx.product_b);
    }

    #[test]
    fn sort_orders_by_age_desc_is_stable() {
        let fx = fixture();
        let sorted = sort_orders_by_age_desc(&fx.orders);

        let ages: Vec<u32> = sorted.iter().map(|o| o.user().age()).collect();
        assert_eq!(ages, vec![20, 20, 19, 19]);
        // Stability: Charlie's order precedes John's, Alice's precedes Bob's.
        assert_eq!(sorted[0].user(), &fx.charlie);
        assert_eq!(sorted[1].user(), &fx.john);
        assert_eq!(sorted[2].user(), &fx.alice);
        assert_eq!(sorted[3].user(), &fx.bob);
    }

    #[test]
    fn order_weights_sums_real_products_only() {
        let fx = fixture();
        let weights = order_weights(&fx.orders);

        // {A, C, D} -> 10; {A, B} -> 16; {A, D} -> 10; {C, D, A, B} -> 16.
        assert_eq!(weights[&fx.orders[0]], 10);
        assert_eq!(weights[&fx.orders[1]], 16);
        assert_eq!(weights[&fx.orders[2]], 10);
        assert_eq!(weights[&fx.orders[3]], 16);
    }

    #[test]
    fn order_weights_of_virtual_only_order_is_zero() {
        let fx = fixture();
        let virtual_only = vec![Order::new(
            fx.alice.clone(),
            vec![fx.product_c.clone(), fx.product_d.clone()],
        )];

        let weights = order_weights(&virtual_only);
        assert_eq!(weights[&virtual_only[0]], 0);
    }

    #[test]
    fn order_weights_of_empty_order_is_zero() {
        let orders = productless_orders();
        let weights = order_weights(&orders);
        assert_eq!(weights[&orders[0]], 0);
        assert_eq!(weights[&orders[1]], 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn order_of(prices: &[f64]) -> Order {
            let products = prices
                .iter()
                .map(|&price| Arc::new(Product::new_real("P", price, 1, 1)))
                .collect();
            Order::new(Arc::new(User::new("Alice", 19)), products)
        }

        proptest! {
            /// Property: the most expensive product's price is >= every price
            /// in the flattened set.
            #[test]
            fn most_expensive_dominates_all_prices(
                prices in proptest::collection::vec(0.0f64..10_000.0, 1..32)
            ) {
                let orders = vec![order_of(&prices)];
                let best = most_expensive_product(&orders).unwrap();
                for price in prices {
                    prop_assert!(best.price() >= price);
                }
            }

            /// Property: sorting by price is idempotent.
            #[test]
            fn sort_products_by_price_is_idempotent(
                prices in proptest::collection::vec(0.0f64..10_000.0, 0..32)
            ) {
                let products: Vec<Arc<Product>> = prices
                    .iter()
                    .map(|&price| Arc::new(Product::new_real("P", price, 1, 1)))
                    .collect();

                let once = sort_products_by_price(&products);
                let twice = sort_products_by_price(&once);
                prop_assert_eq!(once, twice);
            }

            /// Property: an order's weight is exactly the sum of its real
            /// products' weights.
            #[test]
            fn order_weight_is_the_sum_of_real_weights(
                weights in proptest::collection::vec(0u32..1_000, 0..16)
            ) {
                let registry = CodeRegistry::new();
                let mut products: Vec<Arc<Product>> = Vec::new();
                for (i, &weight) in weights.iter().enumerate() {
                    products.push(Arc::new(Product::new_real("P", 1.0, 1, weight)));
                    if i % 2 == 0 {
                        products.push(Arc::new(Product::new_virtual(
                            "V",
                            1.0,
                            "code",
                            NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
                            &registry,
                        )));
                    }
                }
                let order = Order::new(Arc::new(User::new("Alice", 19)), products);
                let expected: u32 = weights.iter().sum();

                let totals = order_weights(std::slice::from_ref(&order));
                prop_assert_eq!(totals[&order], expected);
            }
        }
    }
}
