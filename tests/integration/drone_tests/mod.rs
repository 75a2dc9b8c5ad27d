mod crash;
mod flight;
mod ground;
mod phone;
