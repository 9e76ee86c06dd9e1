// forkful_server/src/seed.rs

//! The fixed restaurant catalogue written by `POST /init-restaurants`.

use crate::store::keys::restaurant_key;
use crate::store::{put_json, KvStore, StoreError};
use forkful::model::{MenuItem, Restaurant};
use tracing::{info, instrument};

fn dish(id: &str, name: &str, price: f64, description: &str, image: &str) -> MenuItem {
  MenuItem {
    id: id.to_string(),
    name: name.to_string(),
    price,
    description: description.to_string(),
    image: image.to_string(),
  }
}

pub fn seed_restaurants() -> Vec<Restaurant> {
  vec![
    Restaurant {
      id: "1".to_string(),
      name: "Giuseppe's Pizzeria".to_string(),
      image: "https://images.unsplash.com/photo-1563245738-9169ff58eccf?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxwaXp6YSUyMHJlc3RhdXJhbnR8ZW58MXx8fHwxNzYzMzQ0MTg3fDA&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.8,
      delivery_time: "25-35".to_string(),
      distance: "1.2 km".to_string(),
      cuisine: "Italian".to_string(),
      price_range: "₹₹".to_string(),
      description: "Authentic Italian pizzeria serving wood-fired pizzas with fresh ingredients imported from Italy.".to_string(),
      address: "123 Main Street, Downtown".to_string(),
      phone: "+1 (555) 123-4567".to_string(),
      menu: vec![
        dish("1", "Margherita Pizza", 12.99, "Classic pizza with tomato, mozzarella, and basil", "https://images.unsplash.com/photo-1574071318508-1cdbab80d002?w=400"),
        dish("2", "Pepperoni Pizza", 14.99, "Loaded with premium pepperoni", "https://images.unsplash.com/photo-1628840042765-356cda07504e?w=400"),
        dish("3", "Quattro Formaggi", 15.99, "Four cheese pizza", "https://images.unsplash.com/photo-1513104890138-7c749659a591?w=400"),
      ],
    },
    Restaurant {
      id: "2".to_string(),
      name: "Burger House".to_string(),
      image: "https://images.unsplash.com/photo-1688246780164-00c01647e78c?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxidXJnZXIlMjBmb29kfGVufDF8fHx8MTc2MzI4NDcyM3ww&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.6,
      delivery_time: "20-30".to_string(),
      distance: "0.8 km".to_string(),
      cuisine: "American".to_string(),
      price_range: "₹".to_string(),
      description: "Gourmet burgers made with 100% grass-fed beef and artisan buns.".to_string(),
      address: "456 Oak Avenue, Downtown".to_string(),
      phone: "+1 (555) 234-5678".to_string(),
      menu: vec![
        dish("1", "Classic Burger", 9.99, "Beef patty with lettuce, tomato, and special sauce", "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400"),
        dish("2", "Bacon Cheeseburger", 11.99, "With crispy bacon and cheddar cheese", "https://images.unsplash.com/photo-1553979459-d2229ba7433b?w=400"),
        dish("3", "Veggie Burger", 10.99, "Plant-based patty with fresh vegetables", "https://images.unsplash.com/photo-1520072959219-c595dc870360?w=400"),
      ],
    },
    Restaurant {
      id: "3".to_string(),
      name: "Tokyo Sushi Bar".to_string(),
      image: "https://images.unsplash.com/photo-1730325559618-940c72290ef0?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxzdXNoaSUyMGphcGFuZXNlfGVufDF8fHx8MTc2MzMzMDkyM3ww&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.9,
      delivery_time: "30-40".to_string(),
      distance: "2.5 km".to_string(),
      cuisine: "Japanese".to_string(),
      price_range: "₹₹₹".to_string(),
      description: "Traditional Japanese sushi restaurant with master chefs and premium ingredients.".to_string(),
      address: "789 Sakura Lane, Downtown".to_string(),
      phone: "+1 (555) 345-6789".to_string(),
      menu: vec![
        dish("1", "Salmon Nigiri", 14.99, "Fresh salmon over sushi rice", "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=400"),
        dish("2", "California Roll", 12.99, "Crab, avocado, and cucumber", "https://images.unsplash.com/photo-1617196034796-73dfa7b1fd56?w=400"),
        dish("3", "Sashimi Platter", 24.99, "Assorted fresh fish", "https://images.unsplash.com/photo-1583623025817-d180a2221d0a?w=400"),
      ],
    },
    Restaurant {
      id: "4".to_string(),
      name: "Pasta Paradise".to_string(),
      image: "https://images.unsplash.com/photo-1662197480393-2a82030b7b83?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxpdGFsaWFuJTIwcGFzdGF8ZW58MXx8fHwxNzYzMzgyMTg3fDA&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.7,
      delivery_time: "25-35".to_string(),
      distance: "1.5 km".to_string(),
      cuisine: "Italian".to_string(),
      price_range: "₹₹".to_string(),
      description: "Family-owned Italian restaurant specializing in handmade pasta.".to_string(),
      address: "321 Pasta Street, Downtown".to_string(),
      phone: "+1 (555) 456-7890".to_string(),
      menu: vec![
        dish("1", "Spaghetti Carbonara", 13.99, "Creamy pasta with pancetta", "https://images.unsplash.com/photo-1612874742237-6526221588e3?w=400"),
        dish("2", "Fettuccine Alfredo", 12.99, "Rich and creamy Alfredo sauce", "https://images.unsplash.com/photo-1645112411341-6c4fd023714a?w=400"),
        dish("3", "Lasagna", 15.99, "Layers of pasta, meat, and cheese", "https://images.unsplash.com/photo-1574894709920-11b28e7367e3?w=400"),
      ],
    },
    Restaurant {
      id: "5".to_string(),
      name: "Taco Fiesta".to_string(),
      image: "https://images.unsplash.com/photo-1552332386-f8dd00dc2f85?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxtZXhpY2FuJTIwdGFjb3N8ZW58MXx8fHwxNzYzMjkxNDUwfDA&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.5,
      delivery_time: "20-30".to_string(),
      distance: "1.0 km".to_string(),
      cuisine: "Mexican".to_string(),
      price_range: "₹".to_string(),
      description: "Authentic Mexican street food with bold flavors and fresh ingredients.".to_string(),
      address: "654 Fiesta Avenue, Downtown".to_string(),
      phone: "+1 (555) 567-8901".to_string(),
      menu: vec![
        dish("1", "Beef Tacos", 8.99, "Three soft tacos with seasoned beef", "https://images.unsplash.com/photo-1565299585323-38d6b0865b47?w=400"),
        dish("2", "Chicken Burrito", 10.99, "Grilled chicken with rice and beans", "https://images.unsplash.com/photo-1626700051175-6818013e1d4f?w=400"),
        dish("3", "Nachos Supreme", 9.99, "Loaded nachos with all toppings", "https://images.unsplash.com/photo-1513456852971-30c0b8199d4d?w=400"),
      ],
    },
    Restaurant {
      id: "6".to_string(),
      name: "Noodle Kitchen".to_string(),
      image: "https://images.unsplash.com/photo-1635685296916-95acaf58471f?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w3Nzg4Nzd8MHwxfHNlYXJjaHwxfHxhc2lhbiUyMG5vb2RsZXN8ZW58MXx8fHwxNzYzMzIzODQ4fDA&ixlib=rb-4.1.0&q=80&w=1080".to_string(),
      rating: 4.8,
      delivery_time: "25-35".to_string(),
      distance: "1.8 km".to_string(),
      cuisine: "Asian".to_string(),
      price_range: "₹₹".to_string(),
      description: "Pan-Asian noodle house serving ramen, pho, and stir-fried noodles.".to_string(),
      address: "987 Noodle Road, Downtown".to_string(),
      phone: "+1 (555) 678-9012".to_string(),
      menu: vec![
        dish("1", "Tonkotsu Ramen", 13.99, "Rich pork bone broth with noodles", "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=400"),
        dish("2", "Pad Thai", 11.99, "Classic Thai stir-fried noodles", "https://images.unsplash.com/photo-1559314809-0d155014e29e?w=400"),
        dish("3", "Beef Pho", 12.99, "Vietnamese beef noodle soup", "https://images.unsplash.com/photo-1591814468924-caf88d1232e1?w=400"),
      ],
    },
  ]
}

/// Upserts every seed restaurant. Repeating it rewrites identical records.
#[instrument(name = "seed::init_restaurants", skip_all)]
pub async fn init_restaurants(store: &dyn KvStore) -> Result<usize, StoreError> {
  let restaurants = seed_restaurants();
  for restaurant in &restaurants {
    put_json(store, &restaurant_key(&restaurant.id), restaurant).await?;
  }
  info!(count = restaurants.len(), "Seed restaurants written.");
  Ok(restaurants.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn six_restaurants_with_three_dishes_each() {
    let restaurants = seed_restaurants();
    let ids: Vec<&str> = restaurants.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    assert!(restaurants.iter().all(|r| r.menu.len() == 3));
    let sushi = &restaurants[2];
    assert_eq!(sushi.name, "Tokyo Sushi Bar");
    assert_eq!(sushi.rating, 4.9);
  }
}
