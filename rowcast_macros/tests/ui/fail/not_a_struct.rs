use rowcast_macros::Mappable;

#[derive(Mappable)]
enum Shape {
    Circle,
    Square,
}

fn main() {}
