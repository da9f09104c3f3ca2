diesel::table! {
    beer (id) {
        id -> Int4,
        name -> Varchar,
        #[sql_name = "type"]
        type_ -> Varchar,
        brewer_id -> Int4,
        abv -> Float8,
    }
}
