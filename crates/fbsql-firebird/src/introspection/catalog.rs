//! Catalog queries.
//!
//! Every query taking a table binds it as its only parameter. The name is
//! folded to upper case before binding and again by `upper(?)`.

/// User tables (no system tables, no views), tables without outgoing
/// foreign keys first. Rows are `(name, has_foreign_keys)`.
pub const TABLE_LIST: &str = "\
select distinct R.RDB$RELATION_NAME, 0
from RDB$RELATIONS R
where R.RDB$SYSTEM_FLAG = 0 and R.RDB$VIEW_SOURCE is null and not exists(
    select 1
    from RDB$RELATION_CONSTRAINTS RC
    left join RDB$INDICES I1 on (RC.RDB$INDEX_NAME = I1.RDB$INDEX_NAME)
    where RC.RDB$RELATION_NAME = R.RDB$RELATION_NAME
      and RC.RDB$CONSTRAINT_TYPE = 'FOREIGN KEY'
      and I1.RDB$FOREIGN_KEY not in (
          select RDB$INDEX_NAME
          from RDB$RELATION_CONSTRAINTS
          where RDB$RELATION_NAME = RC.RDB$RELATION_NAME
            and RDB$CONSTRAINT_TYPE <> 'FOREIGN KEY'
            and RDB$INDEX_NAME is not null))
union
select distinct R.RDB$RELATION_NAME, 1
from RDB$RELATIONS R
where R.RDB$SYSTEM_FLAG = 0 and R.RDB$VIEW_SOURCE is null and exists(
    select 1
    from RDB$RELATION_CONSTRAINTS RC
    left join RDB$INDICES I1 on (RC.RDB$INDEX_NAME = I1.RDB$INDEX_NAME)
    where RC.RDB$RELATION_NAME = R.RDB$RELATION_NAME
      and RC.RDB$CONSTRAINT_TYPE = 'FOREIGN KEY'
      and I1.RDB$FOREIGN_KEY not in (
          select RDB$INDEX_NAME
          from RDB$RELATION_CONSTRAINTS
          where RDB$RELATION_NAME = RC.RDB$RELATION_NAME
            and RDB$CONSTRAINT_TYPE <> 'FOREIGN KEY'
            and RDB$INDEX_NAME is not null))
order by 2, 1";

/// Raw column facts in column order. Rows are `(name, domain, type,
/// sub_type, length, precision, scale, null_flag, description)`; the scale
/// is already made non-negative.
pub const COLUMN_DESCRIPTION: &str = "\
select
    rf.rdb$field_name,
    rf.rdb$field_source,
    f.rdb$field_type,
    f.rdb$field_sub_type,
    f.rdb$field_length,
    f.rdb$field_precision,
    f.rdb$field_scale * -1,
    rf.rdb$null_flag,
    rf.rdb$description
from rdb$relation_fields rf
join rdb$fields f on (rf.rdb$field_source = f.rdb$field_name)
where rf.rdb$relation_name = upper(?)
order by rf.rdb$field_position";

/// Foreign-key columns. Rows are `(local_position, foreign_position,
/// foreign_table)`.
pub const RELATIONS: &str = "\
select RF1.RDB$FIELD_POSITION, RF2.RDB$FIELD_POSITION, RF2.RDB$RELATION_NAME
from RDB$RELATION_CONSTRAINTS RC1
join RDB$INDICES I1 on (RC1.RDB$INDEX_NAME = I1.RDB$INDEX_NAME)
join RDB$INDEX_SEGMENTS IS1 on (I1.RDB$INDEX_NAME = IS1.RDB$INDEX_NAME)
join RDB$RELATION_FIELDS RF1 on (RC1.RDB$RELATION_NAME = RF1.RDB$RELATION_NAME and IS1.RDB$FIELD_NAME = RF1.RDB$FIELD_NAME)
join RDB$RELATION_CONSTRAINTS RC2 on (RC2.RDB$INDEX_NAME = I1.RDB$FOREIGN_KEY)
join RDB$INDEX_SEGMENTS IS2 on (RC2.RDB$INDEX_NAME = IS2.RDB$INDEX_NAME)
join RDB$RELATION_FIELDS RF2 on (RC2.RDB$RELATION_NAME = RF2.RDB$RELATION_NAME and IS2.RDB$FIELD_NAME = RF2.RDB$FIELD_NAME)
where RF1.RDB$RELATION_NAME = upper(?) and RC1.RDB$CONSTRAINT_TYPE = 'FOREIGN KEY'
order by RF1.RDB$FIELD_POSITION";

/// Columns covered by a unique index. Rows are `(column, kind)` where kind
/// is [`PRIMARY_KEY`] or [`UNIQUE`].
pub const INDEXES: &str = "\
select
    seg2.rdb$field_name,
    case
        when exists (
            select 1
            from rdb$relation_constraints con
            where con.rdb$constraint_type = 'PRIMARY KEY'
              and con.rdb$index_name = i.rdb$index_name
        ) then 'PRIMARY KEY'
        else 'UNIQUE'
    end
from rdb$indices i
join rdb$index_segments seg2 on seg2.rdb$index_name = i.rdb$index_name
where i.rdb$relation_name = upper(?)
  and i.rdb$unique_flag = 1";

/// Index kind reported for primary keys.
pub const PRIMARY_KEY: &str = "PRIMARY KEY";
/// Index kind reported for plain unique indexes.
pub const UNIQUE: &str = "UNIQUE";

/// Registers the columns of one table in the form layout table, skipping
/// those already present. The `ID` column is registered as `RID`.
pub const SEED_FORM_GROUP_FIELDS: &str = "\
insert into FRAMEWORK_FORM_GROUP_FIELDS
    (FIELD_NAME, TABLE_NAME, GROUP_ID, FIELD_ORDER, SHOW_ON_FORM, SHOW_ON_FORM_LIST)
select
    case trim(RF.RDB$FIELD_NAME)
        when 'ID' then 'RID'
        else cast(trim(RF.RDB$FIELD_NAME) as varchar(1024))
    end,
    RF.RDB$RELATION_NAME,
    1,
    RF.RDB$FIELD_POSITION,
    1,
    0
from RDB$RELATION_FIELDS RF
join RDB$FIELDS F on (RF.RDB$FIELD_SOURCE = F.RDB$FIELD_NAME)
where RF.RDB$RELATION_NAME = upper(?)
  and (case trim(RF.RDB$FIELD_NAME)
           when 'ID' then 'RID'
           else cast(trim(RF.RDB$FIELD_NAME) as varchar(1024))
       end) not in (
      select FIELD_NAME
      from FRAMEWORK_FORM_GROUP_FIELDS
      where TABLE_NAME = RF.RDB$RELATION_NAME)
order by RF.RDB$FIELD_POSITION";
